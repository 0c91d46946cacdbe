//! Route cache: per-tick world geometry for every route.
//!
//! Planets move every tick, so endpoints, direction and length are rebuilt
//! wholesale before ships advance. Ships read the cache instead of doing their
//! own square roots.

use std::collections::HashMap;

use orbitlink_core::components::{PlanetState, RouteState};
use orbitlink_core::constants::ROUTE_EPSILON;
use orbitlink_core::types::Vec2;

/// Geometry of one route for the current tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteCacheEntry {
    pub route_id: u32,
    pub source_planet_id: u32,
    pub target_planet_id: u32,
    pub world_start: Vec2,
    pub world_end: Vec2,
    /// Unit vector from start to end, or zero when the endpoints coincide.
    pub direction: Vec2,
    pub total_distance: f64,
    /// Rebuild pass that last wrote this entry.
    generation: u64,
}

/// Route geometry keyed by route id.
#[derive(Debug, Default)]
pub struct RouteCache {
    entries: HashMap<u32, RouteCacheEntry>,
    generation: u64,
}

impl RouteCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(routes: usize) -> Self {
        Self {
            entries: HashMap::with_capacity(routes),
            generation: 0,
        }
    }

    /// Recompute geometry for every route from current planet positions.
    ///
    /// Entries whose route is absent from `routes`, or whose planets cannot be
    /// resolved, are evicted, so ships still referencing them despawn on their
    /// next advance.
    pub fn rebuild(&mut self, routes: &[RouteState], planets: &[PlanetState]) {
        self.generation = self.generation.wrapping_add(1);
        let generation = self.generation;

        for route in routes {
            let (Some(start), Some(end)) = (
                planet_position(planets, route.source_planet_id),
                planet_position(planets, route.target_planet_id),
            ) else {
                continue;
            };

            let displacement = end - start;
            let distance = displacement.length();
            let direction = if distance > ROUTE_EPSILON {
                displacement / distance
            } else {
                Vec2::ZERO
            };

            self.entries.insert(
                route.route_id,
                RouteCacheEntry {
                    route_id: route.route_id,
                    source_planet_id: route.source_planet_id,
                    target_planet_id: route.target_planet_id,
                    world_start: start,
                    world_end: end,
                    direction,
                    total_distance: distance,
                    generation,
                },
            );
        }

        self.entries.retain(|_, entry| entry.generation == generation);
    }

    #[inline]
    pub fn get(&self, route_id: u32) -> Option<&RouteCacheEntry> {
        self.entries.get(&route_id)
    }

    pub fn contains(&self, route_id: u32) -> bool {
        self.entries.contains_key(&route_id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// Linear scan by id. Planet counts stay in the dozens.
fn planet_position(planets: &[PlanetState], planet_id: u32) -> Option<Vec2> {
    planets.iter().find(|p| p.id == planet_id).map(|p| p.position)
}
