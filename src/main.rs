//! loglevel-sync daemon.
//!
//! ```text
//!   remote config (file / admin API push)
//!             │ full snapshot
//!             ▼
//!   ┌─────────────────────┐     ┌──────────────────────┐
//!   │  LogLevelReconciler │────▶│ TracingLoggingSystem │──▶ hierarchy filter layer
//!   │  (override set)     │     │  (known targets)     │
//!   └─────────────────────┘     └──────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;

use loglevel_sync::config::{load_config, AppConfig};
use loglevel_sync::lifecycle::{shutdown, start, Shutdown};
use loglevel_sync::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "loglevel-sync")]
#[command(about = "Apply remotely configured log levels to a running process", long_about = None)]
struct Args {
    /// Daemon configuration file (TOML). Defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => AppConfig::default(),
    };

    let logging = logging::init_logging(&config.logging)?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        config_id = %config.subscription.config_id,
        source = ?config.subscription.source,
        "loglevel-sync starting"
    );

    if config.metrics.enabled {
        match config.metrics.address.parse() {
            Ok(addr) => {
                if let Err(e) = metrics::init_metrics(addr) {
                    tracing::error!(error = %e, "Failed to start metrics endpoint");
                }
            }
            Err(_) => tracing::error!(
                metrics_address = %config.metrics.address,
                "Failed to parse metrics address"
            ),
        }
    }

    let shutdown = Shutdown::new();
    let daemon = start(&config, logging, &shutdown).await?;

    shutdown::wait_for_signal().await;
    tracing::info!("Shutdown signal received");
    shutdown.trigger();
    drop(daemon);

    tracing::info!("Shutdown complete");
    Ok(())
}
