//! Runtime tuning loaded from an optional TOML file.
//!
//! Every field defaults to the matching constant in [`crate::constants`], so a
//! file only needs the keys it wants to override:
//!
//! ```toml
//! base_ship_speed = 3.0
//! jam_radius = 0.8
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::ConfigError;

/// Tunable parameters for a simulation session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    // ── Ships ────────────────────────────────────────────────────────────────
    pub base_ship_speed: f64,
    pub spawn_cooldown_secs: f64,
    pub ship_capacity: usize,

    // ── Collision grid ───────────────────────────────────────────────────────
    pub jam_radius: f64,
    pub grid_half_extent: f64,
    pub grid_cell_size: f64,

    // ── Economy ──────────────────────────────────────────────────────────────
    pub base_payout: f64,
    pub route_upgrade_base_cost: f64,
    pub route_upgrade_multiplier: f64,
    pub prestige_threshold: f64,

    // ── Session ──────────────────────────────────────────────────────────────
    /// Initial time scale (1.0 = normal).
    pub time_scale: f64,
    /// Seed for generated worlds. Same seed = same world.
    pub seed: u64,
    /// Planet count for a generated starting world. Below 2 uses the
    /// hand-authored starter system.
    pub generated_planets: usize,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            base_ship_speed: BASE_SHIP_SPEED,
            spawn_cooldown_secs: SPAWN_COOLDOWN_SECS,
            ship_capacity: MAX_SHIPS,
            jam_radius: JAM_RADIUS,
            grid_half_extent: GRID_HALF_EXTENT,
            grid_cell_size: GRID_CELL_SIZE,
            base_payout: BASE_PAYOUT,
            route_upgrade_base_cost: ROUTE_UPGRADE_BASE_COST,
            route_upgrade_multiplier: ROUTE_UPGRADE_MULTIPLIER,
            prestige_threshold: PRESTIGE_THRESHOLD,
            time_scale: 1.0,
            seed: DEFAULT_SEED,
            generated_planets: 0,
        }
    }
}

impl SimConfig {
    /// Parse a TOML document. Missing keys keep their defaults.
    pub fn from_toml_str(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    /// Load `path` if it exists and parses, otherwise fall back to defaults.
    ///
    /// A missing file is not an error. A malformed or unsafe file is logged and
    /// ignored rather than aborting startup.
    pub fn load_or_default(path: &Path) -> Self {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(_) => {
                log::info!("no config at {}; using compiled defaults", path.display());
                return Self::default();
            }
        };

        match Self::from_toml_str(&contents) {
            Ok(config) => match config.validate() {
                Ok(()) => {
                    log::info!("loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    log::warn!("{}: {e}; using defaults", path.display());
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("failed to parse {}: {e}; using defaults", path.display());
                Self::default()
            }
        }
    }

    /// Reject values that would break the simulation's invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check(
            "base_ship_speed",
            self.base_ship_speed,
            self.base_ship_speed >= 0.0,
            "[0, inf)",
        )?;
        check(
            "spawn_cooldown_secs",
            self.spawn_cooldown_secs,
            self.spawn_cooldown_secs > 0.0,
            "(0, inf)",
        )?;
        check(
            "ship_capacity",
            self.ship_capacity as f64,
            (1..=u16::MAX as usize).contains(&self.ship_capacity),
            "[1, 65535]",
        )?;
        check(
            "grid_half_extent",
            self.grid_half_extent,
            self.grid_half_extent > 0.0,
            "(0, inf)",
        )?;
        check(
            "grid_cell_size",
            self.grid_cell_size,
            self.grid_cell_size > 0.0,
            "(0, inf)",
        )?;
        // A 3x3 neighbourhood only covers the jam radius if it fits in one cell.
        check(
            "jam_radius",
            self.jam_radius,
            self.jam_radius >= 0.0 && self.jam_radius <= self.grid_cell_size,
            "[0, grid_cell_size]",
        )?;
        check(
            "base_payout",
            self.base_payout,
            self.base_payout >= 0.0,
            "[0, inf)",
        )?;
        check(
            "route_upgrade_base_cost",
            self.route_upgrade_base_cost,
            self.route_upgrade_base_cost >= 0.0,
            "[0, inf)",
        )?;
        check(
            "route_upgrade_multiplier",
            self.route_upgrade_multiplier,
            self.route_upgrade_multiplier >= 1.0,
            "[1, inf)",
        )?;
        check(
            "prestige_threshold",
            self.prestige_threshold,
            self.prestige_threshold > 0.0,
            "(0, inf)",
        )?;
        check(
            "time_scale",
            self.time_scale,
            (0.0..=MAX_TIME_SCALE).contains(&self.time_scale),
            "[0, 8]",
        )
    }
}

fn check(name: &'static str, value: f64, ok: bool, safe_range: &'static str) -> Result<(), ConfigError> {
    // NaN fails every comparison above, so it lands here too.
    if ok && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::UnsafeValue {
            name,
            value,
            safe_range,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert_eq!(SimConfig::default().validate(), Ok(()));
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = SimConfig::from_toml_str("base_ship_speed = 3.5\nseed = 7\n").unwrap();
        assert_eq!(config.base_ship_speed, 3.5);
        assert_eq!(config.seed, 7);
        assert_eq!(config.jam_radius, JAM_RADIUS);
        assert_eq!(config.ship_capacity, MAX_SHIPS);
    }

    #[test]
    fn jam_radius_larger_than_cell_rejected() {
        let config = SimConfig {
            jam_radius: 3.0,
            grid_cell_size: 2.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::UnsafeValue {
                name: "jam_radius",
                ..
            })
        ));
    }

    #[test]
    fn nan_rejected() {
        let config = SimConfig {
            base_ship_speed: f64::NAN,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let path = std::env::temp_dir().join("orbitlink_config_missing/none.toml");
        assert_eq!(SimConfig::load_or_default(&path), SimConfig::default());
    }

    #[test]
    fn malformed_file_falls_back_to_defaults() {
        let dir = std::env::temp_dir().join("orbitlink_config_malformed");
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("orbitlink.toml");
        std::fs::write(&path, "base_ship_speed = \"fast\"").unwrap();

        assert_eq!(SimConfig::load_or_default(&path), SimConfig::default());

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn unsafe_file_falls_back_to_defaults() {
        let dir = std::env::temp_dir().join("orbitlink_config_unsafe");
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("orbitlink.toml");
        std::fs::write(&path, "grid_cell_size = 0.0").unwrap();

        assert_eq!(SimConfig::load_or_default(&path), SimConfig::default());

        let _ = std::fs::remove_dir_all(&dir);
    }
}
