//! Plain data records for planets, routes and ships.
//!
//! Records carry no behaviour beyond construction helpers. Game logic lives in
//! the simulation systems.

use serde::{Deserialize, Serialize};

use crate::constants::MIN_ORBIT_PERIOD_SECS;
use crate::types::Vec2;

/// A body on a circular orbit around the origin.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct PlanetState {
    /// Stable identity. Routes refer to planets by this id.
    pub id: u32,
    /// Orbit radius (world units).
    pub radius: f64,
    /// Angular speed (radians per second).
    #[serde(rename = "speed")]
    pub angular_speed: f64,
    /// Angle at time zero (radians).
    pub phase: f64,
    /// Upgrade tier.
    #[serde(default)]
    pub level: u32,
    /// Cached position for the current tick. Derived from the fields above and
    /// the global time; written only by the orbit system.
    #[serde(skip)]
    pub position: Vec2,
}

// `position` is derived, so it does not take part in equality.
impl PartialEq for PlanetState {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.radius == other.radius
            && self.angular_speed == other.angular_speed
            && self.phase == other.phase
            && self.level == other.level
    }
}

impl PlanetState {
    pub fn new(id: u32, radius: f64, angular_speed: f64, phase: f64) -> Self {
        Self {
            id,
            radius,
            angular_speed,
            phase,
            level: 0,
            position: Vec2::ZERO,
        }
    }

    /// Build a planet from a period in seconds and a start angle in degrees
    /// (0 = +x axis, 90 = +y axis).
    pub fn from_orbit_period(id: u32, radius: f64, period_secs: f64, start_angle_deg: f64) -> Self {
        let period = period_secs.max(MIN_ORBIT_PERIOD_SECS);
        Self::new(
            id,
            radius,
            std::f64::consts::TAU / period,
            start_angle_deg.to_radians(),
        )
    }
}

/// A one-way shipping lane between two planets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteState {
    pub route_id: u32,
    pub source_planet_id: u32,
    pub target_planet_id: u32,
    /// Upgrade tier. Does not change ship speed.
    #[serde(default)]
    pub level: u32,
}

impl RouteState {
    pub fn new(route_id: u32, source_planet_id: u32, target_planet_id: u32) -> Self {
        Self {
            route_id,
            source_planet_id,
            target_planet_id,
            level: 0,
        }
    }

    /// Whether this route joins `a` and `b`, in either direction.
    pub fn connects(&self, a: u32, b: u32) -> bool {
        (self.source_planet_id == a && self.target_planet_id == b)
            || (self.source_planet_id == b && self.target_planet_id == a)
    }
}

/// A ship in flight. Transient: never persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ShipState {
    /// Monotonic, never reused. The pool slot index is not an identity.
    pub ship_id: u64,
    pub route_id: u32,
    /// Fraction of the route travelled, 0..1.
    pub progress: f64,
    pub current_position: Vec2,
    /// Route end as of the last update. Follows the target planet.
    pub target_position: Vec2,
    /// Set by the collision grid each tick. Jammed ships do not move.
    pub is_jammed: bool,
}
