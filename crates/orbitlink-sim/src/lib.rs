//! Simulation engine for ORBITLINK.
//!
//! Owns planets, routes and the ship pool, runs systems in a fixed order
//! each tick, and produces GameStateSnapshots for hosts.

pub mod economy;
pub mod engine;
pub mod network;
pub mod prestige;
pub mod systems;
pub mod world_setup;

pub use engine::{SimulationEngine, TickSummary};
pub use orbitlink_core as core;
