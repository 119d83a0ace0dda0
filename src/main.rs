//! iq-server — in-memory IQ sample buffer behind a small HTTP API.
//!
//! Run with:  `RUST_LOG=info iq-server --port 7070`

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "iq-server")]
#[command(about = "Receives IQ sample batches and serves the most recent window")]
struct Cli {
    /// Config file (default: $XDG_CONFIG_HOME/iq/iq.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Interface to listen on
    #[arg(long)]
    bind: Option<String>,

    /// TCP port to listen on
    #[arg(short, long)]
    port: Option<u16>,

    /// Number of samples retained in memory
    #[arg(long)]
    capacity: Option<usize>,

    /// Directory served for paths outside the API
    #[arg(long)]
    static_dir: Option<PathBuf>,

    /// Largest accepted request body in bytes
    #[arg(long)]
    max_body_bytes: Option<usize>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Structured logging — RUST_LOG controls verbosity (default: info).
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    tracing::info!("iq-server v{} starting", env!("CARGO_PKG_VERSION"));

    let cli = Cli::parse();
    let path = cli.config.unwrap_or_else(iq_config::default_path);
    let mut config = iq_config::load(&path)
        .with_context(|| format!("loading config from '{}'", path.display()))?;

    let server = &mut config.server;
    if let Some(bind) = cli.bind {
        server.bind = bind;
    }
    if let Some(port) = cli.port {
        server.port = port;
    }
    if let Some(capacity) = cli.capacity {
        server.capacity = capacity;
    }
    if cli.static_dir.is_some() {
        server.static_dir = cli.static_dir;
    }
    if let Some(max_body_bytes) = cli.max_body_bytes {
        server.max_body_bytes = max_body_bytes;
    }
    config.validate()?;

    let server = &config.server;
    iq_server::run(server)
        .await
        .with_context(|| format!("serving on {}:{}", server.bind, server.port))
}
