//! Game configuration
//!
//! Defaults describe the classic board: a 20x20 grid drawn with 20px cells,
//! a three segment snake and a tick that starts at 150ms and shortens by 2ms
//! per food down to 50ms.

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use super::state::GridBounds;

/// Largest grid side accepted by [`GameConfig::validate`]
pub const MAX_GRID_SIDE: usize = 1024;

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width of the game grid in cells
    pub grid_width: usize,
    /// Height of the game grid in cells
    pub grid_height: usize,
    /// Side of one cell on the drawing surface, in pixels
    pub cell_size: u32,
    /// Initial length of the snake
    pub initial_snake_length: usize,

    /// Tick interval at the start of a game, in milliseconds
    pub base_tick_ms: u64,
    /// How much the tick interval shrinks per food eaten, in milliseconds
    pub tick_step_ms: u64,
    /// Lower bound of the tick interval, in milliseconds
    pub min_tick_ms: u64,

    /// Only place food on cells the snake does not occupy
    pub food_avoids_snake: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: 20,
            grid_height: 20,
            cell_size: 20,
            initial_snake_length: 3,
            base_tick_ms: 150,
            tick_step_ms: 2,
            min_tick_ms: 50,
            food_avoids_snake: false,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            grid_width: width,
            grid_height: height,
            ..Default::default()
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(10, 10)
    }

    /// Read a configuration from a JSON file
    ///
    /// Missing fields fall back to their defaults. The result is validated.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;
        let config: GameConfig = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse config {:?}", path))?;
        config
            .validate()
            .map_err(|msg| anyhow!(msg))
            .with_context(|| format!("Invalid config {:?}", path))?;
        Ok(config)
    }

    /// Grid bounds in cells
    pub fn bounds(&self) -> GridBounds {
        GridBounds::new(self.grid_width as i32, self.grid_height as i32)
    }

    /// Size of the drawing surface in pixels, or `None` if it does not fit
    /// in a `u32`
    pub fn surface_size(&self) -> Option<(u32, u32)> {
        let width = u32::try_from(self.grid_width).ok()?.checked_mul(self.cell_size)?;
        let height = u32::try_from(self.grid_height).ok()?.checked_mul(self.cell_size)?;
        Some((width, height))
    }

    pub fn base_tick(&self) -> Duration {
        Duration::from_millis(self.base_tick_ms)
    }

    pub fn min_tick(&self) -> Duration {
        Duration::from_millis(self.min_tick_ms)
    }

    pub fn tick_step(&self) -> Duration {
        Duration::from_millis(self.tick_step_ms)
    }

    /// Validate configuration parameters
    ///
    /// # Returns
    ///
    /// `Ok(())` if all parameters are valid, `Err(String)` with an error message otherwise.
    pub fn validate(&self) -> Result<(), String> {
        if self.grid_width == 0 || self.grid_height == 0 {
            return Err(format!(
                "grid must be at least 1x1, got {}x{}",
                self.grid_width, self.grid_height
            ));
        }

        if self.grid_width > MAX_GRID_SIDE || self.grid_height > MAX_GRID_SIDE {
            return Err(format!(
                "grid can be at most {MAX_GRID_SIDE}x{MAX_GRID_SIDE}, got {}x{}",
                self.grid_width, self.grid_height
            ));
        }

        if self.cell_size < 2 {
            return Err(format!(
                "cell_size must be at least 2 pixels, got {}",
                self.cell_size
            ));
        }

        if self.surface_size().is_none() {
            return Err(format!(
                "a {}x{} grid of {}px cells does not fit on a drawing surface",
                self.grid_width, self.grid_height, self.cell_size
            ));
        }

        if self.initial_snake_length == 0 {
            return Err("initial_snake_length must be at least 1".to_string());
        }

        // The snake starts at the centre heading up, trailing downward
        let room_below_centre = self.grid_height - self.grid_height / 2;
        if self.initial_snake_length > room_below_centre {
            return Err(format!(
                "initial_snake_length ({}) does not fit below the centre of a grid {} cells high",
                self.initial_snake_length, self.grid_height
            ));
        }

        if self.min_tick_ms == 0 {
            return Err("min_tick_ms must be positive".to_string());
        }

        if self.base_tick_ms < self.min_tick_ms {
            return Err(format!(
                "base_tick_ms ({}) cannot be below min_tick_ms ({})",
                self.base_tick_ms, self.min_tick_ms
            ));
        }

        Ok(())
    }
}
