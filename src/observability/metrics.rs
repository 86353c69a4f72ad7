//! Metrics collection and exposition.
//!
//! # Metrics
//! - `loglevel_pushes_total` (counter): snapshots applied
//! - `loglevel_active_overrides` (gauge): overrides in force after the last push
//! - `loglevel_level_changes_total` (counter): levels set, by kind (assigned, restored)
//! - `loglevel_rejected_total` (counter): skipped entries and failed subscriptions, by kind

use std::net::SocketAddr;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Start the Prometheus scrape endpoint on `addr`.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

pub fn record_push(active_overrides: usize) {
    metrics::counter!("loglevel_pushes_total").increment(1);
    metrics::gauge!("loglevel_active_overrides").set(active_overrides as f64);
}

pub fn record_level_change(kind: &'static str) {
    metrics::counter!("loglevel_level_changes_total", "kind" => kind).increment(1);
}

pub fn record_rejected(kind: &'static str) {
    metrics::counter!("loglevel_rejected_total", "kind" => kind).increment(1);
}
