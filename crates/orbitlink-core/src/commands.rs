//! Player commands sent from a host to the simulation.
//!
//! Commands are queued and applied at the next tick boundary, never mid-tick.

use serde::{Deserialize, Serialize};

/// All possible player actions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    // --- Simulation control ---
    /// Stop advancing the clock. Commands are still processed.
    Pause,
    /// Resume advancing the clock.
    Resume,
    /// Set time scale (1.0 = normal, 0.0 = frozen). Clamped to [0, 8].
    SetTimeScale { scale: f64 },

    // --- Route network ---
    /// Open a lane between two planets.
    CreateRoute {
        source_planet_id: u32,
        target_planet_id: u32,
    },
    /// Retire a lane. Ships on it are despawned next tick.
    DeleteRoute { route_id: u32 },
    /// Buy the next route tier.
    UpgradeRoute { route_id: u32 },

    // --- Meta progression ---
    /// Convert wealth into dark matter and reset the world.
    Prestige,
}
