//! Notifications emitted by the simulation for UI and audio hosts.

use serde::{Deserialize, Serialize};

/// Payload delivered when a ship reaches the end of its route.
///
/// Carries both the route and the target planet (resolved from the route
/// cache at arrival time) so payouts can scale by either.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShipArrival {
    pub ship_id: u64,
    pub route_id: u32,
    pub target_planet_id: u32,
}

/// Everything a host may want to react to. Delivered in tick order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SimEvent {
    ShipSpawned {
        ship_id: u64,
        route_id: u32,
    },
    ShipArrived(ShipArrival),
    /// Wallet balance after the change.
    BalanceChanged {
        wallet_balance: f64,
    },
    PrestigeCompleted {
        dark_matter_earned: f64,
        dark_matter_balance: f64,
    },
    /// A queued command could not be applied.
    CommandRejected {
        reason: String,
    },
}
