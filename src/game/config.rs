use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::error::GameError;

/// Side of one grid cell, in map pixels
pub const DEFAULT_SEGMENT_SIZE: u32 = 30;
/// Initial snake length as a share of the shorter grid side
pub const DEFAULT_INITIAL_LENGTH_PERCENT: u32 = 20;
/// Minimum time between two processed ticks
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 70;

/// Configuration for the game
///
/// The map is described in pixels, the way a drawing surface sees it. Everything the
/// simulation needs in cell units is derived through [`GameConfig::geometry`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width of the map in pixels
    pub map_width: u32,
    /// Height of the map in pixels
    pub map_height: u32,
    /// Side of one segment in pixels
    pub segment_size: u32,
    /// Initial snake length, in percent of the shorter grid side (rounded up)
    pub initial_length_percent: u32,
    /// Tick gate in milliseconds
    pub tick_interval_ms: u64,
    /// Seed for food placement; `None` draws from OS entropy
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            map_width: 600,
            map_height: 600,
            segment_size: DEFAULT_SEGMENT_SIZE,
            initial_length_percent: DEFAULT_INITIAL_LENGTH_PERCENT,
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with a custom map size in pixels
    pub fn new(map_width: u32, map_height: u32) -> Self {
        Self {
            map_width,
            map_height,
            ..Default::default()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Load a configuration serialized as JSON. Missing fields take their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: GameConfig = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        Ok(config)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Validate and derive the grid geometry
    pub fn geometry(&self) -> Result<GridGeometry, GameError> {
        self.validate()?;

        let segment = self.segment_size;
        let max_x = (self.map_width / segment) as i32;
        let max_y = (self.map_height / segment) as i32;

        // ceil(percent * min / (100 * segment)), kept in integers
        let minimum = self.map_width.min(self.map_height) as u64;
        let initial_length = (self.initial_length_percent as u64 * minimum)
            .div_ceil(100 * segment as u64) as usize;

        if initial_length == 0 {
            return Err(GameError::InvalidConfig(
                "initial snake length rounds to zero".to_string(),
            ));
        }
        if initial_length > max_x as usize {
            return Err(GameError::InvalidConfig(format!(
                "initial snake length {initial_length} does not fit a grid {max_x} cells wide"
            )));
        }

        Ok(GridGeometry {
            max_x,
            max_y,
            segment_size: segment,
            initial_length,
        })
    }

    pub fn validate(&self) -> Result<(), GameError> {
        if self.segment_size == 0 {
            return Err(GameError::InvalidConfig(
                "segment_size must be positive".to_string(),
            ));
        }
        if self.map_width < self.segment_size || self.map_height < self.segment_size {
            return Err(GameError::InvalidConfig(format!(
                "map {}x{} is smaller than one {}px segment",
                self.map_width, self.map_height, self.segment_size
            )));
        }
        if self.map_width / self.segment_size > i32::MAX as u32
            || self.map_height / self.segment_size > i32::MAX as u32
        {
            return Err(GameError::InvalidConfig("map is too large".to_string()));
        }
        if self.initial_length_percent == 0 || self.initial_length_percent > 100 {
            return Err(GameError::InvalidConfig(format!(
                "initial_length_percent must be in 1..=100, got {}",
                self.initial_length_percent
            )));
        }
        if self.tick_interval_ms == 0 {
            return Err(GameError::InvalidConfig(
                "tick_interval_ms must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Grid dimensions in segment units, derived from the map size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridGeometry {
    /// Number of cells along x
    pub max_x: i32,
    /// Number of cells along y
    pub max_y: i32,
    /// Side of one cell in pixels
    pub segment_size: u32,
    /// Snake length at the start of a round
    pub initial_length: usize,
}

impl GridGeometry {
    pub fn cell_count(&self) -> usize {
        self.max_x as usize * self.max_y as usize
    }
}
