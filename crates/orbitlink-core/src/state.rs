//! Durable game state: everything that survives a restart.

use serde::{Deserialize, Serialize};

use crate::components::{PlanetState, RouteState};

/// The save-file snapshot. Ships are deliberately absent: they are regenerated
/// by the simulation and never written to disk.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersistedState {
    /// Spendable credits. Never negative.
    pub wallet_balance: f64,
    /// Meta-currency. Survives prestige.
    pub dark_matter_balance: f64,
    pub planets: Vec<PlanetState>,
    pub routes: Vec<RouteState>,
}

impl PersistedState {
    pub fn planet(&self, planet_id: u32) -> Option<&PlanetState> {
        self.planets.iter().find(|p| p.id == planet_id)
    }

    pub fn route(&self, route_id: u32) -> Option<&RouteState> {
        self.routes.iter().find(|r| r.route_id == route_id)
    }

    pub fn route_mut(&mut self, route_id: u32) -> Option<&mut RouteState> {
        self.routes.iter_mut().find(|r| r.route_id == route_id)
    }
}
