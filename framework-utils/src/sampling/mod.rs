//! Point set sampling.
//!
//! - [`poisson`] - Bridson's Poisson-disc sampling over rectangles and circles

pub mod poisson;

pub use poisson::{
    MAX_GRID_CELLS, PoissonDiskSample, PoissonDiskSettings, SampleGrid, sample_circle,
    sample_rectangle,
};
