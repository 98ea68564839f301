//! UAV swarm search CLI.
//!
//! Runs one particle swarm search and prints the best position, the target
//! position and the total sensor data. Parameters come from defaults, an
//! optional JSON config file, then command-line overrides, in that order.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use uav_swarm::report::render_text;
use uav_swarm::{Swarm, SwarmConfig};

#[derive(Parser)]
#[command(name = "uav_search")]
#[command(version)]
#[command(about = "Particle swarm search for a stationary target")]
struct Cli {
    /// JSON config file; missing fields use defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of UAVs in the swarm
    #[arg(long)]
    uavs: Option<usize>,

    /// Search-space dimension
    #[arg(long)]
    dim: Option<usize>,

    /// Iteration budget
    #[arg(long)]
    iterations: Option<usize>,

    /// Seed for a reproducible run
    #[arg(long, env = "UAV_SEARCH_SEED")]
    seed: Option<u64>,

    /// Decimal places in the text report
    #[arg(long, default_value = "6")]
    precision: usize,

    /// Print the outcome as JSON instead of text
    #[arg(long)]
    json: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn load_config(path: &Path) -> Result<SwarmConfig> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing config {}", path.display()))
}

fn resolve_config(cli: &Cli) -> Result<SwarmConfig> {
    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => SwarmConfig::default(),
    };
    if let Some(uavs) = cli.uavs {
        config.population_size = uavs;
    }
    if let Some(dim) = cli.dim {
        config.dimension = dim;
    }
    if let Some(iterations) = cli.iterations {
        config.n_iterations = iterations;
    }
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }
    Ok(config)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let config = resolve_config(&cli)?;
    info!(
        uavs = config.population_size,
        dim = config.dimension,
        iterations = config.n_iterations,
        seed = ?config.seed,
        "starting search"
    );

    let outcome = Swarm::new(config)
        .context("invalid swarm configuration")?
        .run()
        .context("search failed")?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        print!("{}", render_text(&outcome, cli.precision));
    }
    Ok(())
}
