//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! reconcile, sources, admin API produce:
//!     → logging.rs (structured log events; the filter follows pushed levels)
//!     → metrics.rs (counters, gauges)
//!
//! Consumers:
//!     → stdout (pretty or JSON)
//!     → Metrics endpoint (Prometheus scrape)
//! ```

pub mod logging;
pub mod metrics;
