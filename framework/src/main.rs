//! Command-line driver for `framework-utils`.
//!
//! Usage: `framework [CONFIG]`. Loads the JSON5 configuration (creating the
//! default one if it is missing), runs the Poisson-disc, noise and Gaussian
//! samplers and writes a JSON report.

use std::env;
use std::io;
use std::path::PathBuf;
use std::time::Instant;

use tracing_subscriber::EnvFilter;

use crate::config::{DEFAULT_CONFIG_PATH, FrameworkConfig};
use crate::report::Report;

mod config;
mod report;

fn main() -> anyhow::Result<()> {
    let path = env::args_os()
        .nth(1)
        .map_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from);
    let (config, created) = FrameworkConfig::load_or_create(&path)?;

    init_tracing(&config.log_level);
    if created {
        tracing::info!(path = %path.display(), "Wrote default configuration");
    }

    let seed = config.resolve_seed();
    tracing::info!(seed, "Generating report");

    let start = Instant::now();
    let report = Report::generate(&config, seed)?;
    tracing::info!("Report generated in {:?}", start.elapsed());

    report.write(&config.output)
}

/// Installs the `fmt` subscriber on stderr. `RUST_LOG` takes precedence over
/// the configured level.
fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
