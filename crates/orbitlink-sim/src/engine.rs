//! Simulation engine: the session object that owns every subsystem.
//!
//! `SimulationEngine` owns the persisted state, the ship pool and the per-tick
//! caches, processes player commands, runs all systems and produces
//! `GameStateSnapshot`s. Completely headless, enabling deterministic testing.

use std::collections::VecDeque;

use log::{debug, info, warn};

use orbitlink_core::commands::PlayerCommand;
use orbitlink_core::components::{PlanetState, RouteState, ShipState};
use orbitlink_core::config::SimConfig;
use orbitlink_core::constants::MAX_TIME_SCALE;
use orbitlink_core::events::SimEvent;
use orbitlink_core::snapshot::GameStateSnapshot;
use orbitlink_core::state::PersistedState;
use orbitlink_core::types::SimTime;

use crate::economy;
use crate::network;
use crate::prestige;
use crate::systems;
use crate::systems::collision::CollisionGrid;
use crate::systems::routes::RouteCache;
use crate::systems::ships::ShipPool;
use crate::systems::snapshot::SnapshotInput;
use crate::world_setup;

/// Counters for one call to [`SimulationEngine::tick`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickSummary {
    /// False when the session was paused and no system ran.
    pub ran: bool,
    pub spawned: usize,
    pub spawn_rejected: usize,
    pub arrived: usize,
    pub orphaned: usize,
    pub payout: f64,
}

/// The simulation engine. Owns the session and all sim state.
pub struct SimulationEngine {
    config: SimConfig,
    state: PersistedState,
    time: SimTime,
    paused: bool,
    time_scale: f64,
    spawn_timer: f64,
    ships: ShipPool,
    route_cache: RouteCache,
    grid: CollisionGrid,
    command_queue: VecDeque<PlayerCommand>,
    events: Vec<SimEvent>,
}

impl SimulationEngine {
    /// Start a fresh session on the default world.
    pub fn new(config: SimConfig) -> Self {
        Self::with_state(config, PersistedState::default())
    }

    /// Resume a loaded session. A state without planets gets the default world.
    pub fn with_state(config: SimConfig, mut state: PersistedState) -> Self {
        let config = match config.validate() {
            Ok(()) => config,
            Err(e) => {
                warn!("rejecting session config: {e}; using defaults");
                SimConfig::default()
            }
        };

        if state.planets.is_empty() {
            let (planets, routes) = world_setup::default_world(&config);
            state.planets = planets;
            state.routes = routes;
        }

        let mut engine = Self {
            time_scale: clamp_time_scale(config.time_scale).unwrap_or(1.0),
            ships: ShipPool::with_capacity(config.ship_capacity),
            route_cache: RouteCache::with_capacity(state.routes.len()),
            grid: CollisionGrid::new(config.grid_half_extent, config.grid_cell_size),
            config,
            state,
            time: SimTime::default(),
            paused: false,
            spawn_timer: 0.0,
            command_queue: VecDeque::new(),
            events: Vec::new(),
        };
        engine.refresh_geometry();
        engine
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation by `dt` real seconds.
    ///
    /// Events from the previous tick that were never drained are discarded.
    pub fn tick(&mut self, dt: f64) -> TickSummary {
        self.events.clear();
        self.process_commands();

        if self.paused {
            return TickSummary::default();
        }

        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        self.run_systems(dt * self.time_scale)
    }

    /// Swap in a loaded state wholesale. Ships and cached geometry are dropped.
    pub fn replace_state(&mut self, state: PersistedState) {
        self.state = state;
        self.ships.clear();
        self.route_cache.clear();
        self.spawn_timer = 0.0;
        self.refresh_geometry();
        info!(
            "session state replaced ({} planets, {} routes)",
            self.state.planets.len(),
            self.state.routes.len()
        );
    }

    /// Throw the session away and start over at time zero on the default
    /// world. The config is kept; balances, ships and queued commands are not.
    pub fn restart(&mut self) {
        let (planets, routes) = world_setup::default_world(&self.config);
        self.state = PersistedState {
            planets,
            routes,
            ..Default::default()
        };
        self.time.reset();
        self.paused = false;
        self.time_scale = clamp_time_scale(self.config.time_scale).unwrap_or(1.0);
        self.spawn_timer = 0.0;
        self.ships = ShipPool::with_capacity(self.config.ship_capacity);
        self.route_cache.clear();
        self.command_queue.clear();
        self.events.clear();
        self.refresh_geometry();
        info!("session restarted on a fresh world");
    }

    /// Hand out queued notifications. The buffer keeps its capacity.
    pub fn drain_events(&mut self) -> std::vec::Drain<'_, SimEvent> {
        self.events.drain(..)
    }

    /// Build a snapshot of the current state. Pending events move into it.
    pub fn snapshot(&mut self) -> GameStateSnapshot {
        let events: Vec<SimEvent> = self.events.drain(..).collect();
        systems::snapshot::build_snapshot(
            SnapshotInput {
                time: self.time,
                paused: self.paused,
                time_scale: self.time_scale,
                state: &self.state,
                route_cache: &self.route_cache,
                ships: self.ships.ships(),
                config: &self.config,
            },
            events,
        )
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn planets(&self) -> &[PlanetState] {
        &self.state.planets
    }

    pub fn routes(&self) -> &[RouteState] {
        &self.state.routes
    }

    pub fn ships(&self) -> &[ShipState] {
        self.ships.ships()
    }

    pub fn route_cache(&self) -> &RouteCache {
        &self.route_cache
    }

    pub fn wallet_balance(&self) -> f64 {
        self.state.wallet_balance
    }

    pub fn dark_matter_balance(&self) -> f64 {
        self.state.dark_matter_balance
    }

    /// The persistable part of the session.
    pub fn state(&self) -> &PersistedState {
        &self.state
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn time_scale(&self) -> f64 {
        self.time_scale
    }

    pub fn can_prestige(&self) -> bool {
        prestige::can_prestige(&self.state, self.config.prestige_threshold)
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Mutable state access for tests that need to seed balances or ships.
    #[cfg(test)]
    pub(crate) fn state_mut(&mut self) -> &mut PersistedState {
        &mut self.state
    }

    #[cfg(test)]
    pub(crate) fn ship_pool_mut(&mut self) -> &mut ShipPool {
        &mut self.ships
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single player command.
    fn handle_command(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::Pause => {
                self.paused = true;
            }
            PlayerCommand::Resume => {
                self.paused = false;
            }
            PlayerCommand::SetTimeScale { scale } => match clamp_time_scale(scale) {
                Some(scale) => self.time_scale = scale,
                None => self.reject(format!("time scale {scale} is not a number")),
            },
            PlayerCommand::CreateRoute {
                source_planet_id,
                target_planet_id,
            } => match network::create_route(&mut self.state, source_planet_id, target_planet_id) {
                Ok(route_id) => {
                    debug!("route {route_id} created: {source_planet_id} -> {target_planet_id}");
                    self.route_cache.rebuild(&self.state.routes, &self.state.planets);
                }
                Err(e) => self.reject(e.to_string()),
            },
            PlayerCommand::DeleteRoute { route_id } => {
                match network::delete_route(&mut self.state, route_id) {
                    Ok(_) => {
                        debug!("route {route_id} deleted");
                        self.route_cache.rebuild(&self.state.routes, &self.state.planets);
                    }
                    Err(e) => self.reject(e.to_string()),
                }
            }
            PlayerCommand::UpgradeRoute { route_id } => self.upgrade_route(route_id),
            PlayerCommand::Prestige => self.prestige(),
        }
    }

    fn upgrade_route(&mut self, route_id: u32) {
        let Some(level) = self.state.route(route_id).map(|r| r.level) else {
            self.reject(format!("route {route_id} does not exist"));
            return;
        };
        let cost = economy::upgrade_cost(
            self.config.route_upgrade_base_cost,
            self.config.route_upgrade_multiplier,
            level,
        );
        if let Err(e) = economy::try_purchase(&mut self.state, cost, &mut self.events) {
            self.reject(e.to_string());
            return;
        }
        if let Some(route) = self.state.route_mut(route_id) {
            route.level += 1;
        }
    }

    fn prestige(&mut self) {
        let default_world = world_setup::default_world(&self.config);
        match prestige::trigger(&mut self.state, self.config.prestige_threshold, default_world) {
            Some(outcome) => {
                self.ships.clear();
                self.route_cache.clear();
                self.spawn_timer = 0.0;
                self.refresh_geometry();
                info!(
                    "prestige: earned {} dark matter (balance {})",
                    outcome.dark_matter_earned, outcome.dark_matter_balance
                );
                self.events.push(SimEvent::PrestigeCompleted {
                    dark_matter_earned: outcome.dark_matter_earned,
                    dark_matter_balance: outcome.dark_matter_balance,
                });
                self.events.push(SimEvent::BalanceChanged {
                    wallet_balance: self.state.wallet_balance,
                });
            }
            None => self.reject(format!(
                "wallet {} is below the prestige threshold {}",
                self.state.wallet_balance, self.config.prestige_threshold
            )),
        }
    }

    fn reject(&mut self, reason: String) {
        debug!("command rejected: {reason}");
        self.events.push(SimEvent::CommandRejected { reason });
    }

    /// Planet positions and route geometry for the current time, without
    /// advancing anything.
    fn refresh_geometry(&mut self) {
        systems::orbit::update_all(&mut self.state.planets, self.time.elapsed_secs);
        self.route_cache.rebuild(&self.state.routes, &self.state.planets);
    }

    /// Run all systems in order.
    fn run_systems(&mut self, dt: f64) -> TickSummary {
        let mut summary = TickSummary {
            ran: true,
            ..Default::default()
        };

        // 1. Clock
        self.time.advance(dt);
        // 2. Orbits
        systems::orbit::update_all(&mut self.state.planets, self.time.elapsed_secs);
        // 3. Route geometry
        self.route_cache.rebuild(&self.state.routes, &self.state.planets);
        // 4. Spawning, once per route per cooldown
        self.spawn_timer -= dt;
        if self.spawn_timer <= 0.0 {
            self.spawn_timer = self.config.spawn_cooldown_secs;
            for route in &self.state.routes {
                match self.ships.try_spawn(route.route_id, &self.route_cache) {
                    Ok(ship_id) => {
                        summary.spawned += 1;
                        self.events.push(SimEvent::ShipSpawned {
                            ship_id,
                            route_id: route.route_id,
                        });
                    }
                    Err(_) => summary.spawn_rejected += 1,
                }
            }
        }
        // 5. Movement and arrivals, paid out as they happen
        let base_payout = self.config.base_payout;
        let state = &mut self.state;
        let events = &mut self.events;
        let mut payout = 0.0;
        let outcome = self.ships.advance(
            dt,
            self.config.base_ship_speed,
            &self.route_cache,
            |arrival| {
                events.push(SimEvent::ShipArrived(arrival));
                payout += economy::credit_arrival(state, &arrival, base_payout, events);
            },
        );
        summary.arrived = outcome.arrived;
        summary.orphaned = outcome.orphaned;
        summary.payout = payout;
        // 6. Jamming
        self.grid
            .evaluate(self.ships.ships_mut(), self.config.jam_radius);

        summary
    }
}

/// Clamp to `[0, MAX_TIME_SCALE]`; `None` for NaN.
fn clamp_time_scale(scale: f64) -> Option<f64> {
    if scale.is_nan() {
        None
    } else {
        Some(scale.clamp(0.0, MAX_TIME_SCALE))
    }
}
