//! Run configuration, loaded from a JSON5 file.
//!
//! A missing file is created from the bundled template so the first run
//! leaves an editable configuration behind.

use std::fs;
use std::num::{NonZeroU32, NonZeroUsize};
use std::path::Path;

use anyhow::{Context, ensure};
use framework_utils::sampling::PoissonDiskSettings;
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Where the configuration is read from when no path is given.
pub const DEFAULT_CONFIG_PATH: &str = "config/framework.json5";

/// Template written on first run. Its values match [`FrameworkConfig::default`].
const DEFAULT_CONFIG: &str = include_str!("../package-content/framework.json5");

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameworkConfig {
    /// Seed for every random draw. Empty picks one at random.
    pub seed: String,
    /// Default `tracing` filter directive.
    pub log_level: String,
    /// Report path, or empty for stdout.
    pub output: String,
    /// Poisson-disc sampling section.
    pub poisson: PoissonConfig,
    /// Gradient noise section.
    pub noise: NoiseConfig,
    /// Gaussian sampling section.
    pub gaussian: GaussianConfig,
}

/// Area the Poisson-disc sampler fills.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum SampleRegion {
    /// Axis-aligned rectangle between its minimum and maximum corner.
    Rectangle {
        /// Minimum corner.
        top_left: Vec2,
        /// Maximum corner.
        bottom_right: Vec2,
    },
    /// Disc around a center point.
    Circle {
        /// Center of the disc.
        center: Vec2,
        /// Radius of the disc.
        radius: f32,
    },
}

/// Poisson-disc sampling parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoissonConfig {
    /// Area to fill.
    pub region: SampleRegion,
    /// Minimum distance between points.
    pub min_distance: f32,
    /// Candidates per active point.
    pub points_per_iteration: u32,
    /// Optional cap on sampler iterations.
    pub max_iterations: Option<NonZeroUsize>,
}

impl PoissonConfig {
    /// Sampler settings for this section.
    #[must_use]
    pub const fn settings(&self) -> PoissonDiskSettings {
        PoissonDiskSettings::new(self.min_distance)
            .with_points_per_iteration(self.points_per_iteration)
            .with_max_iterations(self.max_iterations)
    }
}

/// Noise grid parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoiseConfig {
    /// Grid columns.
    pub width: usize,
    /// Grid rows.
    pub height: usize,
    /// World units per grid step.
    pub scale: f32,
    /// fBm octave count.
    pub octaves: u32,
}

/// Gaussian sampling parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GaussianConfig {
    /// Number of samples to draw.
    pub samples: usize,
    /// Distribution mean.
    pub mean: f64,
    /// Distribution standard deviation.
    pub std_dev: f64,
    /// Optional cap on the tail rejection loop.
    pub max_tail_attempts: Option<NonZeroU32>,
}

impl Default for FrameworkConfig {
    fn default() -> Self {
        Self {
            seed: String::new(),
            log_level: "info".to_owned(),
            output: String::new(),
            poisson: PoissonConfig {
                region: SampleRegion::Rectangle {
                    top_left: Vec2::ZERO,
                    bottom_right: Vec2::splat(100.0),
                },
                min_distance: 5.0,
                points_per_iteration: 30,
                max_iterations: None,
            },
            noise: NoiseConfig {
                width: 32,
                height: 32,
                scale: 0.1,
                octaves: 4,
            },
            gaussian: GaussianConfig {
                samples: 10_000,
                mean: 0.0,
                std_dev: 1.0,
                max_tail_attempts: None,
            },
        }
    }
}

impl FrameworkConfig {
    /// Reads the configuration at `path`, writing the default template there
    /// first if the file does not exist.
    ///
    /// Returns the configuration and whether the file was created.
    pub fn load_or_create(path: &Path) -> anyhow::Result<(Self, bool)> {
        let created = if path.exists() {
            false
        } else {
            if let Some(parent) = path.parent()
                && !parent.as_os_str().is_empty()
            {
                fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create config directory {}", parent.display())
                })?;
            }
            fs::write(path, DEFAULT_CONFIG)
                .with_context(|| format!("Failed to write default config to {}", path.display()))?;
            true
        };

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config = Self::parse(&contents)
            .with_context(|| format!("Invalid config {}", path.display()))?;
        Ok((config, created))
    }

    /// Parses and validates a JSON5 document.
    pub fn parse(contents: &str) -> anyhow::Result<Self> {
        let config: Self = serde_json5::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the values the library does not validate itself.
    ///
    /// Poisson settings are left to the sampler, which reports them as
    /// `InvalidArgument`.
    pub fn validate(&self) -> anyhow::Result<()> {
        ensure!(
            self.noise.scale.is_finite() && self.noise.scale > 0.0,
            "noise.scale must be positive, got {}",
            self.noise.scale
        );
        ensure!(
            self.gaussian.std_dev.is_finite() && self.gaussian.std_dev >= 0.0,
            "gaussian.std_dev must be non-negative, got {}",
            self.gaussian.std_dev
        );
        ensure!(
            self.gaussian.mean.is_finite(),
            "gaussian.mean must be finite"
        );
        Ok(())
    }

    /// Resolves the configured seed.
    ///
    /// Empty strings draw a random seed, integers are used directly and any
    /// other text is hashed like a Java string.
    #[must_use]
    pub fn resolve_seed(&self) -> u64 {
        if self.seed.is_empty() {
            return rand::random();
        }
        let seed: i64 = self.seed.parse().unwrap_or_else(|_| {
            let mut hash: i64 = 0;
            for byte in self.seed.bytes() {
                hash = hash.wrapping_mul(31).wrapping_add(i64::from(byte));
            }
            hash
        });
        seed as u64
    }
}
