use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use thiserror::Error;
use tracing::debug;
use tracing::trace;

use crate::GridSize;
use crate::config::Config;
use crate::grid::Grid;
use crate::grid::GridError;

#[derive(Debug, Error, PartialEq)]
pub enum EngineError {
    #[error("Grid error: {0}")]
    Grid(#[from] GridError),

    #[error("Seed density {density} is not a probability in [0, 1]")]
    InvalidDensity { density: f64 },
}

/// Double buffered Game of Life.
///
/// Two grids of the same size take turns. The active one holds the latest generation and is the
/// one handed out to readers. Each [`Engine::step`] writes the inactive one, from the active one
/// or from the random number generator, and then the two swap roles.
#[derive(Debug)]
pub struct Engine<R: Rng = StdRng> {
    grids: [Grid; 2],

    /// Index of the active grid in `grids`
    active: usize,

    /// Set by [`Engine::request_reseed`], consumed by the next step
    reseed_pending: bool,

    /// Probability of a cell being alive after a reseed
    density: f64,

    rng: R,

    /// Number of steps taken, reseeds included
    generation: u64,
}

impl Engine<StdRng> {
    /// Create an engine with a randomly seeded active grid.
    pub fn new(cols: GridSize, rows: GridSize, density: f64) -> Result<Self, EngineError> {
        Self::with_rng(cols, rows, density, StdRng::from_os_rng())
    }

    pub fn from_config(config: &Config) -> Result<Self, EngineError> {
        let (cols, rows) = config.grid_size();
        Self::new(cols, rows, config.seed_density)
    }
}

impl<R: Rng> Engine<R> {
    /// Create an engine drawing its randomness from `rng`.
    pub fn with_rng(
        cols: GridSize,
        rows: GridSize,
        density: f64,
        rng: R,
    ) -> Result<Self, EngineError> {
        check_density(density)?;

        let grid = Grid::new(cols, rows)?;

        let mut engine = Self {
            grids: [grid.clone(), grid],
            active: 0,
            reseed_pending: false,
            density,
            rng,
            generation: 0,
        };
        engine.reset_seed(density)?;

        debug!(cols, rows, density, "created engine");

        Ok(engine)
    }

    pub fn width(&self) -> GridSize {
        self.grids[self.active].cols()
    }

    pub fn height(&self) -> GridSize {
        self.grids[self.active].rows()
    }

    pub fn density(&self) -> f64 {
        self.density
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_reseed_pending(&self) -> bool {
        self.reseed_pending
    }

    /// The latest generation.
    pub fn current_grid(&self) -> &Grid {
        &self.grids[self.active]
    }

    /// The latest generation, for editing before the next step.
    pub fn current_grid_mut(&mut self) -> &mut Grid {
        &mut self.grids[self.active]
    }

    /// Ask for the next step to reseed instead of advancing.
    ///
    /// The new seed goes into the inactive grid, so it only shows up in
    /// [`Engine::current_grid`] once that step has run.
    pub fn request_reseed(&mut self) {
        self.reseed_pending = true;
    }

    /// Reseed the active grid in place. Meant for initialization, the configured density is left
    /// untouched.
    pub fn reset_seed(&mut self, density: f64) -> Result<(), EngineError> {
        check_density(density)?;

        self.grids[self.active].fill_random(&mut self.rng, density);

        Ok(())
    }

    /// Advance one generation, or perform a pending reseed, then swap buffers.
    pub fn step(&mut self) {
        let inactive = 1 - self.active;

        if self.reseed_pending {
            self.grids[inactive].fill_random(&mut self.rng, self.density);
            self.reseed_pending = false;

            debug!(generation = self.generation + 1, "reseeded");
        } else {
            let (current, next) = buffers(&mut self.grids, self.active);
            current.next_generation_into(next);
        }

        self.active = inactive;
        self.generation += 1;

        trace!(
            generation = self.generation,
            population = self.current_grid().population(),
            "stepped"
        );
    }
}

/// Split the double buffer into the grid to read (`active`) and the grid to write.
fn buffers(grids: &mut [Grid; 2], active: usize) -> (&Grid, &mut Grid) {
    let [a, b] = grids;

    if active == 0 { (&*a, b) } else { (&*b, a) }
}

fn check_density(density: f64) -> Result<(), EngineError> {
    if !(0f64..=1f64).contains(&density) {
        return Err(EngineError::InvalidDensity { density });
    }

    Ok(())
}
