//! Numerical utilities for the framework.
//!
//! - [`math`] - Scalar helpers (wrapping, rounding, remapping, decibels) and damped springs
//! - [`geometry`] - Ray, plane and line algebra plus swing-twist rotation decomposition
//! - [`noise`] - Deterministic Perlin gradient noise and fractal Brownian motion
//! - [`random`] - Injected random source, Ziggurat Gaussian sampler and random helpers
//! - [`sampling`] - Poisson-disc (blue noise) point sampling

pub mod error;
pub mod geometry;
pub mod math;
pub mod noise;
pub mod random;
pub mod sampling;

pub use error::InvalidArgument;
