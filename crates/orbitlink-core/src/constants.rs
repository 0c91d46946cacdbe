//! Simulation constants and tuning defaults.
//!
//! `SimConfig::default()` reads every field from here, so this module stays the
//! authoritative source of default values.

/// Host tick rate (Hz).
pub const TICK_RATE: u32 = 30;

/// Seconds per host tick.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

// --- Ships ---

/// Maximum number of ships in flight at once.
pub const MAX_SHIPS: usize = 1500;

/// Ship travel speed along a route (world units per second).
pub const BASE_SHIP_SPEED: f64 = 2.0;

/// Seconds between spawn waves (one ship per route per wave).
pub const SPAWN_COOLDOWN_SECS: f64 = 1.0;

// --- Collision grid ---

/// Two ships at or within this distance jam each other (world units).
pub const JAM_RADIUS: f64 = 1.0;

/// Half the side length of the square play area covered by the grid.
pub const GRID_HALF_EXTENT: f64 = 30.0;

/// Side length of one grid cell (world units).
pub const GRID_CELL_SIZE: f64 = 2.0;

/// Ship indices stored per cell before overflow is dropped.
pub const MAX_SHIPS_PER_CELL: usize = 8;

// --- Geometry ---

/// Routes shorter than this have no direction and complete instantly.
pub const ROUTE_EPSILON: f64 = 1e-4;

/// Shortest orbital period accepted when building planets from a period.
pub const MIN_ORBIT_PERIOD_SECS: f64 = 0.001;

// --- Economy ---

/// Credits paid for each ship arrival.
pub const BASE_PAYOUT: f64 = 10.0;

/// Cost of the first route upgrade.
pub const ROUTE_UPGRADE_BASE_COST: f64 = 100.0;

/// Growth factor applied per route level.
pub const ROUTE_UPGRADE_MULTIPLIER: f64 = 1.15;

// --- Prestige ---

/// Wallet balance required to prestige. 1 trillion credits -> 1 dark matter.
pub const PRESTIGE_THRESHOLD: f64 = 1e12;

// --- Simulation control ---

/// Upper bound for the time scale command.
pub const MAX_TIME_SCALE: f64 = 8.0;

/// Seed used for generated worlds.
pub const DEFAULT_SEED: u64 = 42;

/// Route id handed to the first route of a network.
pub const FIRST_ROUTE_ID: u32 = 101;
