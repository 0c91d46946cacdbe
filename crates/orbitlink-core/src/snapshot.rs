//! Read-only views handed to rendering and UI hosts.
//!
//! Hosts read these; they never write simulation state.

use serde::{Deserialize, Serialize};

use crate::events::SimEvent;
use crate::types::{SimTime, Vec2};

/// Complete visible state, built on demand after a tick.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub time: SimTime,
    pub paused: bool,
    pub time_scale: f64,
    pub wallet_balance: f64,
    pub dark_matter_balance: f64,
    pub can_prestige: bool,
    pub planets: Vec<PlanetView>,
    pub routes: Vec<RouteView>,
    pub ships: Vec<ShipView>,
    /// Notifications raised since the previous snapshot.
    pub events: Vec<SimEvent>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlanetView {
    pub id: u32,
    pub position: Vec2,
    pub orbit_radius: f64,
    pub level: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RouteView {
    pub route_id: u32,
    pub source_planet_id: u32,
    pub target_planet_id: u32,
    pub start: Vec2,
    pub end: Vec2,
    pub level: u32,
    /// Price of the next tier.
    pub upgrade_cost: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShipView {
    pub ship_id: u64,
    pub route_id: u32,
    pub position: Vec2,
    pub target: Vec2,
    pub progress: f64,
    pub jammed: bool,
}
