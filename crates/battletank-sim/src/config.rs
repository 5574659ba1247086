//! Engine configuration.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use battletank_core::constants::*;
use battletank_core::types::Field;

/// Smallest field the generator can lay out a level on.
pub const MIN_FIELD_WIDTH: i32 = 10;
pub const MIN_FIELD_HEIGHT: i32 = 8;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("field {width}x{height} is below the {}x{} minimum", MIN_FIELD_WIDTH, MIN_FIELD_HEIGHT)]
    FieldTooSmall { width: i32, height: i32 },
    #[error("{name} must be within {min}..={max}, got {value}")]
    OutOfRange {
        name: &'static str,
        value: u32,
        min: u32,
        max: u32,
    },
}

/// Configuration for starting a new simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    pub field_width: i32,
    pub field_height: i32,
    /// Lives granted by a new game.
    pub starting_lives: u32,
    /// Ticks a projectile keeps flying after the tick it was fired.
    pub projectile_range: u32,
    /// Per-tick bonus spawn chance in percent.
    pub bonus_spawn_chance: u32,
    /// Load the next level as soon as the current one is cleared.
    pub auto_advance: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            field_width: DEFAULT_FIELD_WIDTH,
            field_height: DEFAULT_FIELD_HEIGHT,
            starting_lives: PLAYER_LIVES,
            projectile_range: PROJECTILE_RANGE,
            bonus_spawn_chance: BONUS_SPAWN_CHANCE_PERCENT,
            auto_advance: false,
        }
    }
}

impl SimConfig {
    /// Parse and validate a JSON config. Missing keys take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: SimConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.field_width < MIN_FIELD_WIDTH || self.field_height < MIN_FIELD_HEIGHT {
            return Err(ConfigError::FieldTooSmall {
                width: self.field_width,
                height: self.field_height,
            });
        }
        check_range("starting_lives", self.starting_lives, 1, 99)?;
        check_range("projectile_range", self.projectile_range, 1, 64)?;
        check_range("bonus_spawn_chance", self.bonus_spawn_chance, 0, 100)?;
        Ok(())
    }

    pub fn field(&self) -> Field {
        Field::new(self.field_width, self.field_height)
    }
}

fn check_range(name: &'static str, value: u32, min: u32, max: u32) -> Result<(), ConfigError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            name,
            value,
            min,
            max,
        })
    }
}
