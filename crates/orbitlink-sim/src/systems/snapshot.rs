//! Snapshot system: builds a complete GameStateSnapshot from engine state.
//!
//! This system is read-only. It allocates, so hosts call it once per frame at
//! most, never from inside the tick.

use orbitlink_core::components::ShipState;
use orbitlink_core::config::SimConfig;
use orbitlink_core::events::SimEvent;
use orbitlink_core::snapshot::*;
use orbitlink_core::state::PersistedState;
use orbitlink_core::types::SimTime;

use crate::economy;
use crate::prestige;
use crate::systems::routes::RouteCache;

/// Everything the snapshot reads, borrowed from the engine.
pub struct SnapshotInput<'a> {
    pub time: SimTime,
    pub paused: bool,
    pub time_scale: f64,
    pub state: &'a PersistedState,
    pub route_cache: &'a RouteCache,
    pub ships: &'a [ShipState],
    pub config: &'a SimConfig,
}

/// Build a complete GameStateSnapshot.
pub fn build_snapshot(input: SnapshotInput<'_>, events: Vec<SimEvent>) -> GameStateSnapshot {
    let state = input.state;
    GameStateSnapshot {
        time: input.time,
        paused: input.paused,
        time_scale: input.time_scale,
        wallet_balance: state.wallet_balance,
        dark_matter_balance: state.dark_matter_balance,
        can_prestige: prestige::can_prestige(state, input.config.prestige_threshold),
        planets: build_planets(state),
        routes: build_routes(state, input.route_cache, input.config),
        ships: build_ships(input.ships),
        events,
    }
}

fn build_planets(state: &PersistedState) -> Vec<PlanetView> {
    let mut planets: Vec<PlanetView> = state
        .planets
        .iter()
        .map(|p| PlanetView {
            id: p.id,
            position: p.position,
            orbit_radius: p.radius,
            level: p.level,
        })
        .collect();

    planets.sort_by_key(|p| p.id);
    planets
}

/// Routes without geometry (unresolved planets) are left out.
fn build_routes(state: &PersistedState, cache: &RouteCache, config: &SimConfig) -> Vec<RouteView> {
    let mut routes: Vec<RouteView> = state
        .routes
        .iter()
        .filter_map(|route| {
            let entry = cache.get(route.route_id)?;
            Some(RouteView {
                route_id: route.route_id,
                source_planet_id: route.source_planet_id,
                target_planet_id: route.target_planet_id,
                start: entry.world_start,
                end: entry.world_end,
                level: route.level,
                upgrade_cost: economy::upgrade_cost(
                    config.route_upgrade_base_cost,
                    config.route_upgrade_multiplier,
                    route.level,
                ),
            })
        })
        .collect();

    routes.sort_by_key(|r| r.route_id);
    routes
}

fn build_ships(ships: &[ShipState]) -> Vec<ShipView> {
    let mut views: Vec<ShipView> = ships
        .iter()
        .map(|s| ShipView {
            ship_id: s.ship_id,
            route_id: s.route_id,
            position: s.current_position,
            target: s.target_position,
            progress: s.progress,
            jammed: s.is_jammed,
        })
        .collect();

    views.sort_by_key(|s| s.ship_id);
    views
}
