//! Game configuration.

use crate::error::{EngineError, Result};
use crate::game::{Grid, MAX_GRID_SIZE, MIN_GRID_SIZE};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Default board side.
pub const DEFAULT_SIZE: usize = 4;

/// Default tile value that wins the game.
pub const DEFAULT_WIN_VALUE: u32 = 1024;

/// Default probability that a spawned tile is a 4.
pub const DEFAULT_FOUR_PROBABILITY: f64 = 0.1;

/// Rules for a game session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Board side length.
    pub size: usize,
    /// Tile value whose creation wins the game.
    pub win_value: u32,
    /// Probability that a spawned tile is a 4 rather than a 2.
    pub four_probability: f64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_SIZE,
            win_value: DEFAULT_WIN_VALUE,
            four_probability: DEFAULT_FOUR_PROBABILITY,
        }
    }
}

impl GameConfig {
    /// Check that the configuration describes a playable game.
    ///
    /// # Errors
    ///
    /// Returns the first invalid field.
    pub fn validate(&self) -> Result<()> {
        if !(MIN_GRID_SIZE..=MAX_GRID_SIZE).contains(&self.size) {
            return Err(EngineError::InvalidGridSize { size: self.size });
        }
        if self.win_value < 4 || !self.win_value.is_power_of_two() {
            return Err(EngineError::InvalidWinValue {
                value: self.win_value,
            });
        }
        if !(0.0..=1.0).contains(&self.four_probability) {
            return Err(EngineError::InvalidSpawnProbability(self.four_probability));
        }
        Ok(())
    }

    /// An empty grid of the configured size.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidGridSize`] for an unsupported size.
    pub fn empty_grid(&self) -> Result<Grid> {
        Grid::new(self.size)
    }

    /// Read a JSON configuration file; missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or the result
    /// fails [`GameConfig::validate`].
    pub fn load(path: &Path) -> std::result::Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
        let config: Self = serde_json::from_str(&text).map_err(ConfigError::Json)?;
        config.validate().map_err(ConfigError::Invalid)?;
        Ok(config)
    }
}

/// Error loading a configuration file.
#[derive(Debug)]
pub enum ConfigError {
    /// File could not be read.
    Io(std::io::Error),
    /// File is not valid JSON for [`GameConfig`].
    Json(serde_json::Error),
    /// File parsed but describes an unplayable game.
    Invalid(EngineError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "cannot read config: {e}"),
            ConfigError::Json(e) => write!(f, "malformed config: {e}"),
            ConfigError::Invalid(e) => write!(f, "invalid config: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}
