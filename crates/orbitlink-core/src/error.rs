//! Error types for recoverable simulation failures.
//!
//! None of these abort a tick. Callers either ignore them (spawns are retried
//! next cooldown) or turn them into a `CommandRejected` event.

use std::fmt;

/// Why a ship could not be spawned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnRejected {
    /// The pool is full. The spawn is dropped, not queued.
    AtCapacity { capacity: usize },
    /// The route has no cache entry this tick.
    UnknownRoute { route_id: u32 },
}

impl fmt::Display for SpawnRejected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpawnRejected::AtCapacity { capacity } => {
                write!(f, "ship pool is at capacity ({capacity})")
            }
            SpawnRejected::UnknownRoute { route_id } => {
                write!(f, "route {route_id} has no cached geometry")
            }
        }
    }
}

impl std::error::Error for SpawnRejected {}

/// Route network edits that were refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteError {
    /// Source and target are the same planet.
    SamePlanet { planet_id: u32 },
    /// A referenced planet does not exist.
    UnknownPlanet { planet_id: u32 },
    /// The two planets are already connected (in either direction).
    DuplicateRoute { existing_route_id: u32 },
    /// No route has this id.
    UnknownRoute { route_id: u32 },
    /// The highest route id is already `u32::MAX`.
    RouteIdsExhausted,
}

impl fmt::Display for RouteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteError::SamePlanet { planet_id } => {
                write!(f, "cannot connect planet {planet_id} to itself")
            }
            RouteError::UnknownPlanet { planet_id } => write!(f, "unknown planet {planet_id}"),
            RouteError::DuplicateRoute { existing_route_id } => write!(
                f,
                "planets are already connected by route {existing_route_id}"
            ),
            RouteError::UnknownRoute { route_id } => write!(f, "unknown route {route_id}"),
            RouteError::RouteIdsExhausted => write!(f, "no route ids left to assign"),
        }
    }
}

impl std::error::Error for RouteError {}

/// A purchase that left the wallet untouched.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PurchaseError {
    InsufficientFunds { cost: f64, balance: f64 },
    /// Negative, NaN or infinite cost.
    InvalidCost { cost: f64 },
}

impl fmt::Display for PurchaseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PurchaseError::InsufficientFunds { cost, balance } => write!(
                f,
                "insufficient funds: cost {cost:.2}, balance {balance:.2}"
            ),
            PurchaseError::InvalidCost { cost } => write!(f, "invalid cost {cost}"),
        }
    }
}

impl std::error::Error for PurchaseError {}

/// A configuration value outside its safe operating range.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    UnsafeValue {
        /// Field name (for logging).
        name: &'static str,
        /// The rejected value.
        value: f64,
        /// Human-readable description of the safe range.
        safe_range: &'static str,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::UnsafeValue {
                name,
                value,
                safe_range,
            } => write!(f, "config '{name}' = {value} is outside safe range {safe_range}"),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offender() {
        let msg = SpawnRejected::UnknownRoute { route_id: 7 }.to_string();
        assert!(msg.contains('7'));

        let msg = RouteError::DuplicateRoute {
            existing_route_id: 101,
        }
        .to_string();
        assert!(msg.contains("101"));

        let msg = ConfigError::UnsafeValue {
            name: "grid_cell_size",
            value: 0.0,
            safe_range: "(0, inf)",
        }
        .to_string();
        assert!(msg.contains("grid_cell_size"));
    }
}
