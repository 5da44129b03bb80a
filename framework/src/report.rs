//! Report generation.
//!
//! Runs every sampler once with the configured parameters and collects the
//! results into a single serializable document.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use anyhow::Context;
use framework_utils::noise::GradientNoise;
use framework_utils::random::{GaussianSampler, Xoroshiro};
use framework_utils::sampling::{PoissonDiskSample, sample_circle, sample_rectangle};
use glam::Vec2;
use serde::Serialize;

use crate::config::{FrameworkConfig, GaussianConfig, NoiseConfig, PoissonConfig, SampleRegion};

/// Everything produced by one run.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    /// Seed all generators were derived from.
    pub seed: u64,
    /// Poisson-disc output.
    pub poisson: PoissonReport,
    /// Normalized fBm grid.
    pub noise: NoiseReport,
    /// Summary of the Gaussian draw.
    pub gaussian: GaussianReport,
}

/// Poisson-disc output.
#[derive(Debug, Clone, Serialize)]
pub struct PoissonReport {
    /// Region that was filled.
    pub region: SampleRegion,
    /// Minimum distance between points.
    pub min_distance: f32,
    /// Grid columns.
    pub grid_width: usize,
    /// Grid rows.
    pub grid_height: usize,
    /// Accepted points in acceptance order.
    pub points: Vec<Vec2>,
}

/// Noise grid in `[0, 1]`, row-major.
#[derive(Debug, Clone, Serialize)]
pub struct NoiseReport {
    /// Columns per row.
    pub width: usize,
    /// Number of rows.
    pub height: usize,
    /// Octaves summed per value.
    pub octaves: u32,
    /// One entry per row.
    pub rows: Vec<Vec<f32>>,
}

/// Sample statistics of the Gaussian draw.
#[derive(Debug, Clone, Serialize)]
pub struct GaussianReport {
    /// Number of samples drawn.
    pub samples: usize,
    /// Requested mean.
    pub mean: f64,
    /// Requested standard deviation.
    pub std_dev: f64,
    /// Mean of the samples.
    pub sample_mean: f64,
    /// Population variance of the samples.
    pub sample_variance: f64,
    /// Smallest sample.
    pub min: f64,
    /// Largest sample.
    pub max: f64,
}

impl Report {
    /// Runs all samplers. Each one gets its own generator forked from `seed`,
    /// so changing one section does not shift the others.
    pub fn generate(config: &FrameworkConfig, seed: u64) -> anyhow::Result<Self> {
        let mut root = Xoroshiro::from_seed(seed);
        let mut poisson_rng = root.fork();
        let mut gaussian_rng = root.fork();

        Ok(Self {
            seed,
            poisson: sample_poisson(&config.poisson, &mut poisson_rng)?,
            noise: sample_noise(&config.noise),
            gaussian: sample_gaussian(&config.gaussian, &mut gaussian_rng),
        })
    }

    /// Writes the report as pretty JSON to `output`, or stdout when it is empty.
    pub fn write(&self, output: &str) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        if output.is_empty() {
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{json}")?;
            return Ok(());
        }

        let path = Path::new(output);
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::write(path, json).with_context(|| format!("Failed to write report to {output}"))?;
        tracing::info!(path = output, "Report written");
        Ok(())
    }
}

fn sample_poisson(config: &PoissonConfig, rng: &mut Xoroshiro) -> anyhow::Result<PoissonReport> {
    let settings = config.settings();
    let PoissonDiskSample { points, grid } = match config.region {
        SampleRegion::Rectangle {
            top_left,
            bottom_right,
        } => sample_rectangle(top_left, bottom_right, &settings, rng),
        SampleRegion::Circle { center, radius } => sample_circle(center, radius, &settings, rng),
    }
    .context("Poisson disk sampling failed")?;

    tracing::info!(
        points = points.len(),
        cells = grid.width() * grid.height(),
        "Poisson disk sampling done"
    );
    Ok(PoissonReport {
        region: config.region,
        min_distance: config.min_distance,
        grid_width: grid.width(),
        grid_height: grid.height(),
        points,
    })
}

fn sample_noise(config: &NoiseConfig) -> NoiseReport {
    let noise = GradientNoise::new();
    let rows = (0..config.height)
        .map(|y| {
            (0..config.width)
                .map(|x| {
                    let point = Vec2::new(x as f32, y as f32) * config.scale;
                    // fBm amplitudes sum to just under 1, so this stays in [0, 1].
                    ((noise.fbm_2d(point, config.octaves) + 1.0) * 0.5).clamp(0.0, 1.0)
                })
                .collect()
        })
        .collect();

    tracing::debug!(
        width = config.width,
        height = config.height,
        "Noise grid done"
    );
    NoiseReport {
        width: config.width,
        height: config.height,
        octaves: config.octaves,
        rows,
    }
}

fn sample_gaussian(config: &GaussianConfig, rng: &mut Xoroshiro) -> GaussianReport {
    let sampler = GaussianSampler::new().with_max_tail_attempts(config.max_tail_attempts);

    let mut sum = 0.0;
    let mut sum_sq = 0.0;
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for _ in 0..config.samples {
        let value = sampler.next_sample_with(config.mean, config.std_dev, rng);
        sum += value;
        sum_sq += value * value;
        min = min.min(value);
        max = max.max(value);
    }

    let (sample_mean, sample_variance) = if config.samples == 0 {
        (0.0, 0.0)
    } else {
        let n = config.samples as f64;
        let mean = sum / n;
        (mean, (sum_sq / n - mean * mean).max(0.0))
    };
    if config.samples == 0 {
        min = 0.0;
        max = 0.0;
    }

    tracing::info!(
        samples = config.samples,
        sample_mean,
        sample_variance,
        "Gaussian sampling done"
    );
    GaussianReport {
        samples: config.samples,
        mean: config.mean,
        std_dev: config.std_dev,
        sample_mean,
        sample_variance,
        min,
        max,
    }
}
