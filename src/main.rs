//! Veneto venue lookup service.
//!
//! # Architecture Overview
//!
//! ```text
//!   Client request
//!   ───────────────▶ http::server (router + middleware)
//!                        │
//!                        ▼
//!                    http::handlers ──▶ lookup ──▶ dataset (preloaded tables)
//!                        │
//!                        ├──▶ JSON response
//!                        └──▶ http::download ──▶ <venue>.txt on disk ──▶ octet-stream
//! ```
//!
//! Startup is fail-fast: a bad config or an unreadable table exits non-zero.

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use veneto_venues::config::{self, AppConfig};
use veneto_venues::dataset::Datasets;
use veneto_venues::http::HttpServer;
use veneto_venues::lifecycle::Shutdown;
use veneto_venues::observability::{self, metrics};

#[derive(Parser)]
#[command(name = "veneto-venues")]
#[command(about = "District, city and venue lookup service", long_about = None)]
struct Cli {
    /// TOML configuration file; defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the listener bind address.
    #[arg(short, long)]
    bind: Option<String>,

    /// Directory holding data.csv and cinema.csv; overrides both dataset paths.
    #[arg(long)]
    data_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => config::load_config(path)?,
        None => AppConfig::default(),
    };
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
    }
    if let Some(dir) = cli.data_dir {
        config.datasets.venues_path = dir.join("data.csv").to_string_lossy().into_owned();
        config.datasets.cinemas_path = dir.join("cinema.csv").to_string_lossy().into_owned();
    }
    config::validation::validate_config(&config).map_err(config::ConfigError::Validation)?;

    observability::init_logging(&config.observability);
    tracing::info!("veneto-venues v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        venues_path = %config.datasets.venues_path,
        cinemas_path = %config.datasets.cinemas_path,
        output_dir = %config.downloads.output_dir,
        "Configuration loaded"
    );

    let datasets = Datasets::load(&config.datasets).inspect_err(|e| {
        tracing::error!(error = %e, "Failed to load datasets");
    })?;

    if config.observability.metrics_enabled {
        if let Ok(addr) = config.observability.metrics_address.parse() {
            metrics::init_metrics(addr);
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config, datasets);
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
