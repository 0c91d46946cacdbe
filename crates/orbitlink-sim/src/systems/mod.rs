//! Systems that operate on the simulation each tick.
//!
//! Systems do not own session state. The engine hands each one the slices and
//! caches it needs, in a fixed order.

pub mod collision;
pub mod orbit;
pub mod routes;
pub mod ships;
pub mod snapshot;
