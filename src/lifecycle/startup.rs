//! Startup orchestration.
//!
//! # Responsibilities
//! - Create the reconciler around the chosen logging system
//! - Subscribe it to the configured remote source
//! - Bind and spawn the admin API when enabled

use std::net::SocketAddr;
use std::sync::Arc;

use thiserror::Error;
use tokio::net::TcpListener;

use crate::admin::{setup_admin_router, AdminState};
use crate::backend::LoggingSystem;
use crate::config::{AppConfig, SourceKind};
use crate::lifecycle::Shutdown;
use crate::reconcile::LogLevelReconciler;
use crate::source::{FileConfigSource, HttpConfigSource};

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("failed to bind admin API on {address}: {source}")]
    Bind {
        address: String,
        source: std::io::Error,
    },
}

/// A running daemon. Dropping it stops file watching.
pub struct Daemon<L> {
    pub reconciler: Arc<LogLevelReconciler<L>>,
    pub http_source: Arc<HttpConfigSource>,
    /// Address the admin API actually bound to.
    pub admin_addr: Option<SocketAddr>,
    /// False when the subscription was refused and levels stay static.
    pub subscribed: bool,
    _file_source: Option<Arc<FileConfigSource>>,
}

pub async fn start<L: LoggingSystem + 'static>(
    config: &AppConfig,
    logging: L,
    shutdown: &Shutdown,
) -> Result<Daemon<L>, StartupError> {
    let reconciler = Arc::new(LogLevelReconciler::new(logging));
    let http_source = Arc::new(HttpConfigSource::new());
    let config_id = config.subscription.config_id.as_str();

    let (subscription, file_source) = match config.subscription.source {
        SourceKind::File => {
            let source = Arc::new(FileConfigSource::new(&config.subscription.directory));
            (reconciler.subscribe(&*source, config_id), Some(source))
        }
        SourceKind::Http => (reconciler.subscribe(&*http_source, config_id), None),
    };
    let subscribed = subscription.is_ok();
    if !subscribed {
        tracing::warn!(config_id, "Continuing with static log levels");
    }

    let admin_addr = if config.admin.enabled {
        let address = config.admin.bind_address.clone();
        let listener = TcpListener::bind(&address)
            .await
            .map_err(|source| StartupError::Bind { address: address.clone(), source })?;
        let local_addr = listener.local_addr().map_err(|source| StartupError::Bind { address, source })?;

        let state = AdminState {
            source: http_source.clone(),
            overrides: reconciler.clone(),
            api_key: Arc::from(config.admin.api_key.as_str()),
        };
        let router = setup_admin_router(state);
        let mut shutdown_rx = shutdown.subscribe();

        tokio::spawn(async move {
            let server = axum::serve(listener, router).with_graceful_shutdown(async move {
                let _ = shutdown_rx.recv().await;
            });
            if let Err(e) = server.await {
                tracing::error!(error = %e, "Admin API stopped with error");
            }
        });
        tracing::info!(address = %local_addr, "Admin API listening");
        Some(local_addr)
    } else {
        None
    };

    Ok(Daemon {
        reconciler,
        http_source,
        admin_addr,
        subscribed,
        _file_source: file_source,
    })
}
