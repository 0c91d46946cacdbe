//! Fundamental geometric and simulation types.

use serde::{Deserialize, Serialize};

/// 2D world-space vector (double precision). Origin is the star.
pub type Vec2 = glam::DVec2;

/// Simulation clock. The only owner of global simulation time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SimTime {
    /// Number of ticks the clock has advanced.
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl SimTime {
    /// Advance by one tick of `dt` seconds. No clamping, no pause logic:
    /// a host that wants to pause simply stops calling this.
    pub fn advance(&mut self, dt: f64) {
        self.tick += 1;
        self.elapsed_secs += dt;
    }

    /// Back to zero. Only a fresh session does this.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
