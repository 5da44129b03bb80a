//! Argument validation errors.
//!
//! Degenerate geometry (parallel rays, singular planes) is not an error and is
//! reported through `Option` returns instead. Only malformed caller input ends
//! up here.

use thiserror::Error;

/// An input-contract violation at a public call boundary.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InvalidArgument {
    /// The minimum distance between samples must be positive and finite.
    #[error("Minimum distance must be positive and finite, got {0}")]
    MinDistance(f32),
    /// At least one candidate must be tried per active point.
    #[error("Points per iteration must be at least 1")]
    ZeroPointsPerIteration,
    /// The sampling rectangle has no area or its corners are swapped.
    #[error("Invalid sampling bounds: top left {top_left:?}, bottom right {bottom_right:?}")]
    Bounds {
        /// Minimum corner.
        top_left: [f32; 2],
        /// Maximum corner.
        bottom_right: [f32; 2],
    },
    /// The region needs more acceleration grid cells than a sampler allocates.
    #[error("Sampling grid of {width}x{height} cells is too large")]
    GridTooLarge {
        /// Grid columns, saturated at `usize::MAX`.
        width: usize,
        /// Grid rows, saturated at `usize::MAX`.
        height: usize,
    },
    /// A circular sampling region needs a positive radius.
    #[error("Radius must be positive and finite, got {0}")]
    Radius(f32),
    /// Items and weights passed to a weighted choice differ in length.
    #[error("Got {items} items but {weights} weights")]
    WeightCountMismatch {
        /// Number of items.
        items: usize,
        /// Number of weights.
        weights: usize,
    },
    /// Weighted choice over an empty set.
    #[error("Cannot choose from an empty set of weights")]
    EmptyWeights,
    /// A weight was negative, NaN or infinite.
    #[error("Weight at index {index} is invalid: {weight}")]
    InvalidWeight {
        /// Position of the offending weight.
        index: usize,
        /// The offending value.
        weight: f32,
    },
    /// All weights were zero.
    #[error("Total weight must be greater than zero")]
    ZeroTotalWeight,
}
