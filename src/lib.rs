pub mod camera;
pub mod cell;
pub mod clock;
pub mod config;
pub mod engine;
pub mod events;
pub mod grid;

/// Grid dimensions, in cells
pub type GridSize = usize;

/// Signed cell coordinate. Any value is valid, it wraps around the torus.
pub type CellOffset = isize;
