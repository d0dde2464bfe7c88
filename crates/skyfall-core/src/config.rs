//! Encounter configuration.
//!
//! Defaults mirror the tuning constants. A config can be loaded from JSON
//! (missing fields fall back to defaults) and must pass [`EncounterConfig::validate`]
//! before an engine is built from it.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::*;
use crate::types::Bounds;

/// Errors raised while loading or validating a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse encounter config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid range for {name}: min {min} exceeds max {max}")]
    InvalidRange { name: &'static str, min: f64, max: f64 },

    #[error("invalid value for {name}: {reason}")]
    InvalidValue {
        name: &'static str,
        reason: &'static str,
    },
}

/// Inclusive millisecond range for randomized intervals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MsRange {
    pub min: f64,
    pub max: f64,
}

/// Inclusive count range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountRange {
    pub min: u32,
    pub max: u32,
}

impl MsRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    fn check(&self, name: &'static str) -> Result<(), ConfigError> {
        if !(self.min.is_finite() && self.max.is_finite()) || self.min < 0.0 {
            return Err(ConfigError::InvalidValue {
                name,
                reason: "must be finite and non-negative",
            });
        }
        if self.min > self.max {
            return Err(ConfigError::InvalidRange {
                name,
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }
}

impl CountRange {
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    fn check(&self, name: &'static str) -> Result<(), ConfigError> {
        if self.min == 0 {
            return Err(ConfigError::InvalidValue {
                name,
                reason: "must be at least 1",
            });
        }
        if self.min > self.max {
            return Err(ConfigError::InvalidRange {
                name,
                min: self.min as f64,
                max: self.max as f64,
            });
        }
        Ok(())
    }
}

/// Boss health thresholds and attack cadences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BossTuning {
    pub max_health: i32,
    pub shield_activate_threshold: i32,
    pub temp_invincible_threshold: i32,
    pub laser_health_threshold: i32,
    pub shield_health: i32,
    pub missile_interval_ms: f64,
    pub barrage_interval_ms: MsRange,
    pub burst_count: CountRange,
    pub final_burst_count: CountRange,
    pub laser_cooldown_ms: MsRange,
    pub shield_rocket_interval_ms: MsRange,
    pub shield_break_ms: f64,
    pub final_missile_delay_ms: f64,
}

impl Default for BossTuning {
    fn default() -> Self {
        Self {
            max_health: BOSS_MAX_HEALTH,
            shield_activate_threshold: SHIELD_HEALTH_THRESHOLD,
            temp_invincible_threshold: TEMP_INVINCIBLE_THRESHOLD,
            laser_health_threshold: LASER_HEALTH_THRESHOLD,
            shield_health: SHIELD_HEALTH,
            missile_interval_ms: MISSILE_INTERVAL_MS,
            barrage_interval_ms: MsRange::new(BARRAGE_INTERVAL_MIN_MS, BARRAGE_INTERVAL_MAX_MS),
            burst_count: CountRange::new(BURST_COUNT_MIN, BURST_COUNT_MAX),
            final_burst_count: CountRange::new(
                FINAL_PHASE_BURST_COUNT_MIN,
                FINAL_PHASE_BURST_COUNT_MAX,
            ),
            laser_cooldown_ms: MsRange::new(LASER_COOLDOWN_MIN_MS, LASER_COOLDOWN_MAX_MS),
            shield_rocket_interval_ms: MsRange::new(
                SHIELD_ROCKET_INTERVAL_MIN_MS,
                SHIELD_ROCKET_INTERVAL_MAX_MS,
            ),
            shield_break_ms: SHIELD_BREAK_MS,
            final_missile_delay_ms: FINAL_PHASE_MISSILE_DELAY_MS,
        }
    }
}

/// Escort wave tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EscortTuning {
    pub limit: usize,
    pub spawn_interval_ms: MsRange,
    pub health: i32,
    pub speed: f64,
    /// Live revenge missiles at which spawning slows down.
    pub revenge_load_threshold: usize,
}

impl Default for EscortTuning {
    fn default() -> Self {
        Self {
            limit: ESCORT_LIMIT,
            spawn_interval_ms: MsRange::new(
                ESCORT_SPAWN_INTERVAL_MIN_MS,
                ESCORT_SPAWN_INTERVAL_MAX_MS,
            ),
            health: ESCORT_HEALTH,
            speed: ESCORT_SPEED,
            revenge_load_threshold: ESCORT_REVENGE_LOAD_THRESHOLD,
        }
    }
}

/// Top-level configuration for one encounter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncounterConfig {
    /// RNG seed for determinism. Same seed = same encounter.
    pub seed: u64,
    pub bounds: Bounds,
    pub boss: BossTuning,
    pub escort: EscortTuning,
    /// Accept developer commands (forced phases, health edits).
    pub developer_mode: bool,
}

impl Default for EncounterConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            bounds: Bounds::default(),
            boss: BossTuning::default(),
            escort: EscortTuning::default(),
            developer_mode: false,
        }
    }
}

impl EncounterConfig {
    /// Parse a JSON document and validate it.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: EncounterConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the encounter cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.bounds.width > 0.0 && self.bounds.height > 0.0) {
            return Err(ConfigError::InvalidValue {
                name: "bounds",
                reason: "width and height must be positive",
            });
        }

        let boss = &self.boss;
        if boss.max_health <= 0 {
            return Err(ConfigError::InvalidValue {
                name: "boss.max_health",
                reason: "must be positive",
            });
        }
        if boss.shield_health <= 0 {
            return Err(ConfigError::InvalidValue {
                name: "boss.shield_health",
                reason: "must be positive",
            });
        }
        for (name, threshold) in [
            ("boss.shield_activate_threshold", boss.shield_activate_threshold),
            ("boss.temp_invincible_threshold", boss.temp_invincible_threshold),
            ("boss.laser_health_threshold", boss.laser_health_threshold),
        ] {
            if threshold < 0 || threshold > boss.max_health {
                return Err(ConfigError::InvalidValue {
                    name,
                    reason: "must lie between zero and max_health",
                });
            }
        }
        // The grace window only clears once the shield goes up; it must not
        // open above the shield threshold.
        if boss.temp_invincible_threshold > boss.shield_activate_threshold {
            return Err(ConfigError::InvalidValue {
                name: "boss.temp_invincible_threshold",
                reason: "must not exceed shield_activate_threshold",
            });
        }
        if boss.missile_interval_ms <= 0.0 {
            return Err(ConfigError::InvalidValue {
                name: "boss.missile_interval_ms",
                reason: "must be positive",
            });
        }
        boss.barrage_interval_ms.check("boss.barrage_interval_ms")?;
        boss.burst_count.check("boss.burst_count")?;
        boss.final_burst_count.check("boss.final_burst_count")?;
        boss.laser_cooldown_ms.check("boss.laser_cooldown_ms")?;
        boss.shield_rocket_interval_ms
            .check("boss.shield_rocket_interval_ms")?;

        let escort = &self.escort;
        if escort.limit == 0 {
            return Err(ConfigError::InvalidValue {
                name: "escort.limit",
                reason: "must be at least 1",
            });
        }
        if escort.health <= 0 {
            return Err(ConfigError::InvalidValue {
                name: "escort.health",
                reason: "must be positive",
            });
        }
        escort.spawn_interval_ms.check("escort.spawn_interval_ms")?;

        Ok(())
    }
}
