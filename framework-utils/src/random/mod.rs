//! Random number generation.
//!
//! Every sampler in this crate takes its randomness from an explicitly passed
//! [`Random`] implementation instead of a global generator, so runs are
//! reproducible from a seed and each thread can own its own generator.
//!
//! - [`Random`] - Uniform source trait with derived helpers
//! - [`xoroshiro::Xoroshiro`] - Default seedable generator (xoroshiro128++)
//! - [`gaussian::GaussianSampler`] - Ziggurat normal-distribution sampler
//! - [`utils`] - Directions, rotations, shuffling and weighted choice

pub mod gaussian;
pub mod utils;
pub mod xoroshiro;

pub use gaussian::GaussianSampler;
pub use xoroshiro::Xoroshiro;

/// 2^-53, the spacing of the doubles produced by [`Random::next_f64`].
const F64_UNIT: f64 = 1.0 / (1u64 << 53) as f64;
/// 2^-24, the spacing of the floats produced by [`Random::next_f32`].
const F32_UNIT: f32 = 1.0 / (1u32 << 24) as f32;

/// A uniform pseudo-random source.
///
/// Only [`next_u64`](Random::next_u64) is required; everything else is derived
/// from it.
pub trait Random {
    /// Returns 64 uniformly distributed bits.
    fn next_u64(&mut self) -> u64;

    /// Returns 32 uniformly distributed bits (the high half of a `u64`).
    fn next_u32(&mut self) -> u32 {
        (self.next_u64() >> 32) as u32
    }

    /// Returns a double in `[0, 1)` with 53 bits of precision.
    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 * F64_UNIT
    }

    /// Returns a double in `(0, 1]`, safe to pass to `ln`.
    fn next_f64_non_zero(&mut self) -> f64 {
        1.0 - self.next_f64()
    }

    /// Returns a float in `[0, 1)` with 24 bits of precision.
    fn next_f32(&mut self) -> f32 {
        (self.next_u32() >> 8) as f32 * F32_UNIT
    }

    /// Returns a float in `[min, max)`.
    fn next_range_f32(&mut self, min: f32, max: f32) -> f32 {
        min + self.next_f32() * (max - min)
    }

    /// Returns an unbiased integer in `[0, bound)`, or `0` when `bound` is zero.
    ///
    /// Uses Lemire's multiply-and-reject method.
    fn next_bounded(&mut self, bound: u32) -> u32 {
        let mut product = u64::from(self.next_u32()) * u64::from(bound);
        let mut low = product as u32;
        if low < bound {
            let threshold = bound.wrapping_neg() % bound;
            while low < threshold {
                product = u64::from(self.next_u32()) * u64::from(bound);
                low = product as u32;
            }
        }
        (product >> 32) as u32
    }

    /// Returns an index in `[0, len)`, or `0` for an empty range.
    fn next_index(&mut self, len: usize) -> usize {
        match u32::try_from(len) {
            Ok(bound) => self.next_bounded(bound) as usize,
            Err(_) => (self.next_u64() % len as u64) as usize,
        }
    }

    /// Returns `true` or `false` with equal probability.
    fn next_bool(&mut self) -> bool {
        self.next_u64() >> 63 == 1
    }

    /// Advances the generator by `count` steps, discarding the output.
    fn consume_count(&mut self, count: usize) {
        for _ in 0..count {
            self.next_u64();
        }
    }

    /// Returns a standard normal sample (mean 0, standard deviation 1).
    fn next_gaussian(&mut self) -> f64
    where
        Self: Sized,
    {
        GaussianSampler::new().next_sample(self)
    }

    /// Returns a normal sample with the given mean and standard deviation.
    fn next_gaussian_with(&mut self, mean: f64, std_dev: f64) -> f64
    where
        Self: Sized,
    {
        GaussianSampler::new().next_sample_with(mean, std_dev, self)
    }
}

impl<R: Random + ?Sized> Random for &mut R {
    #[inline]
    fn next_u64(&mut self) -> u64 {
        (**self).next_u64()
    }
}
