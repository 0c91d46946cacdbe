//! Starting worlds: the hand-authored starter system and seeded generated
//! systems.

use std::f64::consts::TAU;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use orbitlink_core::components::{PlanetState, RouteState};
use orbitlink_core::config::SimConfig;
use orbitlink_core::constants::FIRST_ROUTE_ID;

/// Innermost orbit of a generated system.
const GENERATED_INNER_RADIUS: f64 = 3.0;

/// Two planets and one route between them.
pub fn starter_world() -> (Vec<PlanetState>, Vec<RouteState>) {
    let planets = vec![
        PlanetState::new(1, 3.0, 0.5, 0.0),
        PlanetState::new(2, 6.0, 0.2, 3.14),
    ];
    let routes = vec![RouteState::new(FIRST_ROUTE_ID, 1, 2)];
    (planets, routes)
}

/// Generate a system of `planet_count` planets from `seed`.
///
/// Radii step outward and stay inside a collision grid of `grid_half_extent`.
/// Periods grow with radius and start angles are random. Consecutive planets
/// are chained with routes. Same seed, same world.
pub fn generate_world(
    seed: u64,
    planet_count: usize,
    grid_half_extent: f64,
) -> (Vec<PlanetState>, Vec<RouteState>) {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut planets = Vec::with_capacity(planet_count);
    // One cell of margin on normal grids, half the extent on tiny ones.
    let outer = (grid_half_extent - 1.0).max(grid_half_extent * 0.5);
    let mut radius = GENERATED_INNER_RADIUS.min(outer);

    for i in 0..planet_count {
        let id = i as u32 + 1;
        let orbit = radius.min(outer);
        let period_secs = TAU * orbit.sqrt() / rng.gen_range(0.8..1.2);
        let start_angle_deg = rng.gen_range(0.0..360.0);
        planets.push(PlanetState::from_orbit_period(id, orbit, period_secs, start_angle_deg));
        radius += rng.gen_range(2.0..4.0);
    }

    let routes = planets
        .windows(2)
        .enumerate()
        .map(|(i, pair)| RouteState::new(FIRST_ROUTE_ID + i as u32, pair[0].id, pair[1].id))
        .collect();

    (planets, routes)
}

/// The world a fresh session (or a prestige reset) starts with.
pub fn default_world(config: &SimConfig) -> (Vec<PlanetState>, Vec<RouteState>) {
    if config.generated_planets >= 2 {
        generate_world(config.seed, config.generated_planets, config.grid_half_extent)
    } else {
        starter_world()
    }
}
