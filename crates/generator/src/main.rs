//! iq-generator — posts synthetic sine/cosine IQ batches to an iq-server.
//!
//! Run with:  `RUST_LOG=info iq-generator --points 10 --interval 1000`

use anyhow::{Context, Result};
use clap::Parser;
use iq_generator::Generator;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "iq-generator")]
#[command(about = "Synthetic IQ data generator for the ingestion webhook")]
struct Cli {
    /// Config file (default: $XDG_CONFIG_HOME/iq/iq.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// URL of the webhook receiver
    #[arg(short, long)]
    webhook: Option<String>,

    /// Number of data points per batch
    #[arg(short, long)]
    points: Option<usize>,

    /// Interval between batches in milliseconds
    #[arg(short, long)]
    interval: Option<u64>,

    /// Time increment between samples
    #[arg(long)]
    step: Option<f64>,

    /// Peak amplitude of the sine/cosine components
    #[arg(long)]
    amplitude: Option<f64>,

    /// Standard deviation of additive Gaussian noise
    #[arg(long)]
    noise: Option<f64>,

    /// RNG seed for reproducible noise
    #[arg(long)]
    seed: Option<u64>,

    /// Stop after this many batches (default: run until Ctrl-C)
    #[arg(short = 'n', long)]
    count: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let path = cli.config.unwrap_or_else(iq_config::default_path);
    let mut config = iq_config::load(&path)
        .with_context(|| format!("loading config from '{}'", path.display()))?;

    let generator = &mut config.generator;
    if let Some(webhook) = cli.webhook {
        generator.webhook = webhook;
    }
    if let Some(points) = cli.points {
        generator.points = points;
    }
    if let Some(interval) = cli.interval {
        generator.interval_ms = interval;
    }
    if let Some(step) = cli.step {
        generator.step = step;
    }
    if let Some(amplitude) = cli.amplitude {
        generator.amplitude = amplitude;
    }
    if let Some(noise) = cli.noise {
        generator.noise = noise;
    }
    if cli.seed.is_some() {
        generator.seed = cli.seed;
    }
    // Batches must fit the body limit of a server sharing this config.
    config.validate()?;
    let config = config.generator;

    tracing::info!("Starting IQ data generator v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Webhook URL: {}", config.webhook);
    tracing::info!("Data points per send: {}", config.points);
    tracing::info!("Interval: {} ms", config.interval_ms);

    let mut generator = Generator::from_config(&config)?;

    let stats = tokio::select! {
        stats = generator.run(cli.count) => stats,
        res = tokio::signal::ctrl_c() => {
            res.context("waiting for Ctrl-C")?;
            tracing::info!("Shutdown requested");
            generator.stats()
        }
    };

    tracing::info!("Sent {} batches ({} failed)", stats.sent, stats.failed);
    Ok(())
}
