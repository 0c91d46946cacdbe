//! Core types and definitions for the ORBITLINK simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! records, commands, events, persisted state, snapshots, tuning and errors.
//! It has no dependency on any host or storage layer.

pub mod commands;
pub mod components;
pub mod config;
pub mod constants;
pub mod error;
pub mod events;
pub mod snapshot;
pub mod state;
pub mod types;
