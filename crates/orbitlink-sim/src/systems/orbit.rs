//! Orbit system: planet positions as a pure function of global time.
//!
//! Positions are recomputed from (phase, angular speed, radius, time) every
//! tick and never integrated, so long sessions cannot drift.

use std::f64::consts::TAU;

use orbitlink_core::components::PlanetState;
use orbitlink_core::types::Vec2;

/// Orbital angle at `global_time`, normalized to `[0, 2π)`.
#[inline]
pub fn angle_at(planet: &PlanetState, global_time: f64) -> f64 {
    let mut angle = (planet.phase + planet.angular_speed * global_time) % TAU;
    if angle < 0.0 {
        angle += TAU;
    }
    // -tiny + TAU rounds to TAU itself.
    if angle >= TAU {
        angle = 0.0;
    }
    angle
}

/// World position of `planet` at `global_time`.
#[inline]
pub fn position_of(planet: &PlanetState, global_time: f64) -> Vec2 {
    let angle = angle_at(planet, global_time);
    Vec2::new(planet.radius * angle.cos(), planet.radius * angle.sin())
}

/// Write every planet's cached position for `global_time`.
pub fn update_all(planets: &mut [PlanetState], global_time: f64) {
    for planet in planets.iter_mut() {
        planet.position = position_of(planet, global_time);
    }
}
