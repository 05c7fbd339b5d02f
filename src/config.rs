use std::time::Duration;

use thiserror::Error;

use crate::GridSize;
use crate::grid::GridError;

/// Display width, in pixels
pub const DISPLAY_WIDTH: u32 = 1200;

/// Display height, in pixels
pub const DISPLAY_HEIGHT: u32 = 800;

/// Side length of a cell, in pixels
pub const CELL_RESOLUTION: u32 = 4;

/// Probability that a cell starts out alive when the grid is seeded
pub const SEED_DENSITY: f64 = 0.2;

pub const TARGET_FRAMERATE: u32 = 60;

/// Each braille character is a 2x4 block of dots
const BRAILLE_COLS: GridSize = 2;
const BRAILLE_ROWS: GridSize = 4;

/// Terminal rows kept free for the status line
const STATUS_ROWS: u16 = 1;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Cell resolution must be at least one pixel")]
    ZeroCellSize,

    #[error("Seed density {density} is not a probability in [0, 1]")]
    InvalidDensity { density: f64 },

    #[error("Target framerate must be positive")]
    ZeroFramerate,

    #[error("Display is too small: {0}")]
    Grid(#[from] GridError),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub display_width: u32,
    pub display_height: u32,
    pub cell_resolution: u32,
    pub seed_density: f64,
    pub target_framerate: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            display_width: DISPLAY_WIDTH,
            display_height: DISPLAY_HEIGHT,
            cell_resolution: CELL_RESOLUTION,
            seed_density: SEED_DENSITY,
            target_framerate: TARGET_FRAMERATE,
        }
    }
}

impl Config {
    /// Size the display to a terminal of `cols x rows` characters, drawn in braille with one
    /// dot per cell. The bottom row is left for the status line.
    pub fn for_terminal(cols: u16, rows: u16) -> Self {
        let rows = rows.saturating_sub(STATUS_ROWS);

        Self {
            display_width: cols as u32 * BRAILLE_COLS as u32,
            display_height: rows as u32 * BRAILLE_ROWS as u32,
            cell_resolution: 1,
            ..Self::default()
        }
    }

    /// Grid dimensions in cells, `(cols, rows)`. Partial cells at the display edge are dropped.
    pub fn grid_size(&self) -> (GridSize, GridSize) {
        let res = self.cell_resolution.max(1);

        (
            (self.display_width / res) as GridSize,
            (self.display_height / res) as GridSize,
        )
    }

    pub fn frame_time(&self) -> Duration {
        Duration::new(0, 1_000_000_000u32 / self.target_framerate.max(1))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cell_resolution == 0 {
            return Err(ConfigError::ZeroCellSize);
        }

        if !(0f64..=1f64).contains(&self.seed_density) {
            return Err(ConfigError::InvalidDensity {
                density: self.seed_density,
            });
        }

        if self.target_framerate == 0 {
            return Err(ConfigError::ZeroFramerate);
        }

        let (cols, rows) = self.grid_size();
        if cols == 0 || rows == 0 {
            return Err(GridError::InvalidDimensions { cols, rows }.into());
        }

        Ok(())
    }
}
