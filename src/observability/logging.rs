//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the global `tracing` subscriber
//! - Filter events through the logger hierarchy so pushes can change levels
//! - Record callsite targets so root fan-out can reach every logger
//!
//! # Design Decisions
//! - JSON format for production, pretty format for development
//! - The configured level seeds the root logger; pushes take over from there

use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, Layer};

use crate::backend::TracingLoggingSystem;
use crate::config::{LogFormat, LoggingConfig};

/// Install the global subscriber and return the logging system driving it.
pub fn init_logging(config: &LoggingConfig) -> Result<TracingLoggingSystem, TryInitError> {
    let logging = TracingLoggingSystem::new(config.level);

    let fmt_layer = match config.format {
        LogFormat::Json => fmt::layer().json().with_target(true).boxed(),
        LogFormat::Pretty => fmt::layer().with_target(true).boxed(),
    };

    tracing_subscriber::registry()
        .with(logging.layer())
        .with(fmt_layer)
        .try_init()?;

    Ok(logging)
}
