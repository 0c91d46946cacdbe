//! Ship pool: fixed-capacity storage for ships in flight.
//!
//! Active ships occupy the prefix `[0, len)` of a slot array allocated once at
//! construction. Removal swaps the last active ship into the hole, so a slot
//! index is only meaningful within the current tick; `ship_id` is the stable
//! identity.

use orbitlink_core::components::ShipState;
use orbitlink_core::constants::{MAX_SHIPS, ROUTE_EPSILON};
use orbitlink_core::error::SpawnRejected;
use orbitlink_core::events::ShipArrival;

use super::routes::RouteCache;

/// What happened during one `advance` pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AdvanceOutcome {
    /// Ships that reached their target and were removed.
    pub arrived: usize,
    /// Ships removed because their route no longer has geometry.
    pub orphaned: usize,
}

/// Preallocated pool of in-flight ships.
#[derive(Debug)]
pub struct ShipPool {
    slots: Box<[ShipState]>,
    len: usize,
    next_ship_id: u64,
}

impl Default for ShipPool {
    fn default() -> Self {
        Self::new()
    }
}

impl ShipPool {
    /// Pool with the default capacity of 1500 ships.
    pub fn new() -> Self {
        Self::with_capacity(MAX_SHIPS)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: vec![ShipState::default(); capacity].into_boxed_slice(),
            len: 0,
            next_ship_id: 1,
        }
    }

    /// Launch a ship at the start of `route_id`.
    ///
    /// A full pool drops the spawn rather than queueing it; nothing else in
    /// the pool changes on rejection.
    pub fn try_spawn(&mut self, route_id: u32, routes: &RouteCache) -> Result<u64, SpawnRejected> {
        if self.is_full() {
            return Err(SpawnRejected::AtCapacity {
                capacity: self.capacity(),
            });
        }
        let Some(route) = routes.get(route_id) else {
            return Err(SpawnRejected::UnknownRoute { route_id });
        };

        let ship_id = self.next_ship_id;
        self.next_ship_id += 1;

        self.slots[self.len] = ShipState {
            ship_id,
            route_id,
            progress: 0.0,
            current_position: route.world_start,
            target_position: route.world_end,
            is_jammed: false,
        };
        self.len += 1;
        Ok(ship_id)
    }

    /// Move every unjammed ship along its route.
    ///
    /// `on_arrival` runs synchronously for each arrival before the iteration
    /// continues. It cannot touch the pool; anything that needs to spawn
    /// ships must be buffered until this call returns.
    pub fn advance<F>(
        &mut self,
        dt: f64,
        base_speed: f64,
        routes: &RouteCache,
        mut on_arrival: F,
    ) -> AdvanceOutcome
    where
        F: FnMut(ShipArrival),
    {
        let mut outcome = AdvanceOutcome::default();

        // Reverse order: despawn swaps the last ship into slot i, and that
        // ship has already been visited.
        for i in (0..self.len).rev() {
            let ship = &mut self.slots[i];
            if ship.is_jammed {
                continue;
            }

            let Some(route) = routes.get(ship.route_id) else {
                self.despawn(i);
                outcome.orphaned += 1;
                continue;
            };

            if route.total_distance > ROUTE_EPSILON {
                ship.progress += (base_speed * dt) / route.total_distance;
            } else {
                ship.progress = 1.0;
            }

            if ship.progress >= 1.0 {
                on_arrival(ShipArrival {
                    ship_id: ship.ship_id,
                    route_id: route.route_id,
                    target_planet_id: route.target_planet_id,
                });
                self.despawn(i);
                outcome.arrived += 1;
            } else {
                ship.current_position =
                    route.world_start + route.direction * (ship.progress * route.total_distance);
                ship.target_position = route.world_end;
            }
        }

        outcome
    }

    /// Remove the ship in slot `index` by moving the last active ship into
    /// it. O(1). Out-of-range indices are ignored.
    pub fn despawn(&mut self, index: usize) {
        if index >= self.len {
            return;
        }
        let last = self.len - 1;
        if index != last {
            self.slots[index] = self.slots[last];
        }
        self.len = last;
    }

    /// Drop every ship. Ids keep counting up.
    pub fn clear(&mut self) {
        self.len = 0;
    }

    /// Active ships, in slot order.
    #[inline]
    pub fn ships(&self) -> &[ShipState] {
        &self.slots[..self.len]
    }

    /// Mutable view of the active prefix, for the collision grid.
    #[inline]
    pub fn ships_mut(&mut self) -> &mut [ShipState] {
        &mut self.slots[..self.len]
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn is_full(&self) -> bool {
        self.len >= self.slots.len()
    }
}
