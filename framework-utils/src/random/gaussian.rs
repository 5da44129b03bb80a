//! Ziggurat sampler for the standard normal distribution.
//!
//! The area under the (unnormalized) density `exp(-x^2 / 2)` for `x >= 0` is
//! covered by [`BLOCK_COUNT`] horizontal blocks of equal area [`A`]. Block 0
//! is the base: a rectangle of width [`R`] plus the whole tail beyond it.
//! Block `i` spans heights `y[i - 1]..y[i]` with width `x[i]`; the part left
//! of `x[i + 1]` lies entirely under the curve and is accepted without
//! evaluating the density.
//!
//! [`A`] and [`R`] were solved offline for 128 blocks. Changing the block
//! count means recomputing both.

use std::num::NonZeroU32;
use std::sync::LazyLock;

use super::Random;

/// Number of blocks in the ziggurat.
pub const BLOCK_COUNT: usize = 128;
/// Right edge of the base rectangle, where the tail starts.
#[allow(clippy::unreadable_literal)]
pub const R: f64 = 3.442619855899;
/// Area of every block.
#[allow(clippy::unreadable_literal)]
pub const A: f64 = 9.91256303526217e-3;

/// 2^-32, maps a `u32` onto `[0, 1)`.
const U32_TO_UNIT: f64 = 1.0 / 4_294_967_296.0;

static TABLES: LazyLock<ZigguratTables> = LazyLock::new(ZigguratTables::compute);

/// Precomputed block boundaries, built once and never mutated.
#[derive(Debug, Clone)]
pub struct ZigguratTables {
    /// Block widths. `x[0]` is the virtual width of the base block (`A / y[0]`),
    /// `x[1] == R` and `x[BLOCK_COUNT] == 0`.
    x: [f64; BLOCK_COUNT + 1],
    /// Top edge of each block. `y[0]` is the density at `R`; the last entry is 1.
    y: [f64; BLOCK_COUNT],
    /// `x[i + 1] / x[i]` scaled to `u32`: a draw below it is inside the
    /// rectangle-only part of block `i`.
    x_comp: [u32; BLOCK_COUNT],
}

impl ZigguratTables {
    fn compute() -> Self {
        let mut x = [0.0; BLOCK_COUNT + 1];
        let mut y = [0.0; BLOCK_COUNT];

        let f = density(R);
        x[0] = A / f;
        x[1] = R;
        y[0] = f;

        for i in 1..BLOCK_COUNT {
            y[i] = y[i - 1] + A / x[i];
            if i + 1 < BLOCK_COUNT {
                x[i + 1] = (-2.0 * y[i].ln()).sqrt();
            }
        }
        x[BLOCK_COUNT] = 0.0;

        let mut x_comp = [0; BLOCK_COUNT];
        x_comp[0] = to_threshold(R / x[0]);
        for i in 1..BLOCK_COUNT {
            x_comp[i] = to_threshold(x[i + 1] / x[i]);
        }

        tracing::trace!(top = y[BLOCK_COUNT - 1], "Ziggurat tables computed");
        Self { x, y, x_comp }
    }

    /// The process-wide tables.
    #[must_use]
    pub fn get() -> &'static Self {
        &TABLES
    }

    /// Block widths, `BLOCK_COUNT + 1` entries.
    #[must_use]
    pub const fn x(&self) -> &[f64] {
        &self.x
    }

    /// Block top edges, `BLOCK_COUNT` entries.
    #[must_use]
    pub const fn y(&self) -> &[f64] {
        &self.y
    }

    /// Rectangle-only acceptance thresholds, `BLOCK_COUNT` entries.
    #[must_use]
    pub const fn x_comp(&self) -> &[u32] {
        &self.x_comp
    }
}

/// Unnormalized Gaussian density.
#[inline]
fn density(x: f64) -> f64 {
    (-0.5 * x * x).exp()
}

#[inline]
fn to_threshold(ratio: f64) -> u32 {
    (ratio * 4_294_967_296.0) as u32
}

/// Draws normally distributed doubles from a uniform [`Random`] source.
///
/// The sampler itself is stateless apart from configuration; the randomness
/// comes from the generator passed to each call.
#[derive(Debug, Clone, Copy)]
pub struct GaussianSampler {
    tables: &'static ZigguratTables,
    max_tail_attempts: Option<NonZeroU32>,
}

impl Default for GaussianSampler {
    fn default() -> Self {
        Self::new()
    }
}

impl GaussianSampler {
    /// Creates a sampler with an unbounded tail rejection loop.
    #[must_use]
    pub fn new() -> Self {
        Self {
            tables: ZigguratTables::get(),
            max_tail_attempts: None,
        }
    }

    /// Caps the tail rejection loop.
    ///
    /// When the cap is hit the tail sample is clamped to [`R`]. This trades a
    /// tiny distortion of the far tail for a bounded worst case.
    #[must_use]
    pub const fn with_max_tail_attempts(mut self, max: Option<NonZeroU32>) -> Self {
        self.max_tail_attempts = max;
        self
    }

    /// The configured tail cap, if any.
    #[must_use]
    pub const fn max_tail_attempts(&self) -> Option<NonZeroU32> {
        self.max_tail_attempts
    }

    /// Returns a sample from the standard normal distribution.
    pub fn next_sample<G: Random + ?Sized>(&self, rng: &mut G) -> f64 {
        let tables = self.tables;
        loop {
            // Low byte: block index and sign. High half: position within the block.
            let bits = rng.next_u64();
            let i = (bits & 0x7F) as usize;
            let sign = if bits & 0x80 == 0 { 1.0 } else { -1.0 };
            let u = (bits >> 32) as u32;

            if i == 0 {
                if u < tables.x_comp[0] {
                    return f64::from(u) * U32_TO_UNIT * tables.x[0] * sign;
                }
                return self.sample_tail(rng) * sign;
            }

            if u < tables.x_comp[i] {
                return f64::from(u) * U32_TO_UNIT * tables.x[i] * sign;
            }

            // Wedge between the rectangle-only part and the block's right edge.
            let x = f64::from(u) * U32_TO_UNIT * tables.x[i];
            let y = tables.y[i - 1] + (tables.y[i] - tables.y[i - 1]) * rng.next_f64();
            if y < density(x) {
                return x * sign;
            }
        }
    }

    /// Returns `mean + sigma * z` for a standard normal `z`.
    pub fn next_sample_with<G: Random + ?Sized>(&self, mean: f64, sigma: f64, rng: &mut G) -> f64 {
        mean + sigma * self.next_sample(rng)
    }

    /// Samples `|x| > R` with Marsaglia's exponential rejection method.
    fn sample_tail<G: Random + ?Sized>(&self, rng: &mut G) -> f64 {
        let mut attempts = 0u32;
        loop {
            if let Some(max) = self.max_tail_attempts
                && attempts >= max.get()
            {
                tracing::trace!(attempts, "Tail attempts exhausted, clamping to R");
                return R;
            }
            attempts += 1;

            let x = -rng.next_f64_non_zero().ln() / R;
            let y = -rng.next_f64_non_zero().ln();
            if y + y >= x * x {
                return R + x;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::Xoroshiro;

    fn moments(samples: &[f64]) -> (f64, f64) {
        let n = samples.len() as f64;
        let mean = samples.iter().sum::<f64>() / n;
        let variance = samples.iter().map(|s| (s - mean).powi(2)).sum::<f64>() / n;
        (mean, variance)
    }

    #[test]
    fn tables_close_at_the_peak() {
        let tables = ZigguratTables::get();
        assert!((tables.y()[BLOCK_COUNT - 1] - 1.0).abs() < 1e-6);
        assert!((tables.x()[1] - R).abs() < f64::EPSILON);
        assert!(tables.x()[BLOCK_COUNT].abs() < f64::EPSILON);
        assert_eq!(tables.x_comp()[BLOCK_COUNT - 1], 0);
    }

    #[test]
    fn tables_are_monotonic() {
        let tables = ZigguratTables::get();
        for i in 1..BLOCK_COUNT {
            assert!(tables.x()[i + 1] < tables.x()[i], "x not decreasing at {i}");
            assert!(tables.y()[i] > tables.y()[i - 1], "y not increasing at {i}");
        }
    }

    #[test]
    fn blocks_have_equal_area() {
        let tables = ZigguratTables::get();
        for i in 1..BLOCK_COUNT {
            let area = tables.x()[i] * (tables.y()[i] - tables.y()[i - 1]);
            assert!((area - A).abs() < 1e-9, "block {i} area {area}");
        }
    }

    #[test]
    fn standard_normal_moments() {
        let mut rng = Xoroshiro::from_seed(12345);
        let sampler = GaussianSampler::new();
        let samples: Vec<f64> = (0..100_000).map(|_| sampler.next_sample(&mut rng)).collect();
        let (mean, variance) = moments(&samples);
        assert!(mean.abs() < 0.02, "mean {mean}");
        assert!((variance - 1.0).abs() < 0.05, "variance {variance}");
    }

    #[test]
    fn one_sigma_mass() {
        let mut rng = Xoroshiro::from_seed(77);
        let within = (0..100_000)
            .filter(|_| rng.next_gaussian().abs() < 1.0)
            .count();
        let fraction = within as f64 / 100_000.0;
        assert!((fraction - 0.6827).abs() < 0.01, "fraction {fraction}");
    }

    #[test]
    fn tail_is_reached() {
        let mut rng = Xoroshiro::from_seed(9);
        let sampler = GaussianSampler::new();
        let beyond = (0..100_000)
            .filter(|_| sampler.next_sample(&mut rng).abs() > R)
            .count();
        assert!(beyond > 0);
    }

    #[test]
    fn mean_and_sigma_scaling() {
        let mut rng = Xoroshiro::from_seed(3);
        let samples: Vec<f64> = (0..50_000)
            .map(|_| rng.next_gaussian_with(10.0, 2.0))
            .collect();
        let (mean, variance) = moments(&samples);
        assert!((mean - 10.0).abs() < 0.05, "mean {mean}");
        assert!((variance - 4.0).abs() < 0.2, "variance {variance}");
    }

    #[test]
    fn same_seed_same_samples() {
        let sampler = GaussianSampler::new();
        let mut a = Xoroshiro::from_seed(1);
        let mut b = Xoroshiro::from_seed(1);
        for _ in 0..1000 {
            assert_eq!(
                sampler.next_sample(&mut a).to_bits(),
                sampler.next_sample(&mut b).to_bits()
            );
        }
    }

    #[test]
    fn capped_tail_stays_finite() {
        let sampler = GaussianSampler::new().with_max_tail_attempts(NonZeroU32::new(1));
        assert_eq!(sampler.max_tail_attempts(), NonZeroU32::new(1));
        let mut rng = Xoroshiro::from_seed(4);
        for _ in 0..100_000 {
            assert!(sampler.next_sample(&mut rng).is_finite());
        }
    }
}
