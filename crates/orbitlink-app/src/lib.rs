//! ORBITLINK headless host.
//!
//! This crate wires the simulation and persistence crates together: a game
//! loop thread that owns the session, and a console front end that feeds it
//! commands.

pub mod console;
pub mod game_loop;
pub mod state;

pub use orbitlink_core as core;
