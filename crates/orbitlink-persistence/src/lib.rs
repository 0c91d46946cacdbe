//! Save and restore for ORBITLINK sessions.
//!
//! Writes go through a temp file so a crash mid-save never leaves a partially
//! written canonical save. Loading degrades from the canonical file, to the
//! temp file, to a fresh state, and never fails.

pub mod save_load;

pub use save_load::{LoadSource, PersistenceError, SaveStore};
