//! Runtime log level reconciliation.
//!
//! Follows a remote configuration stream of `logging.level.*` entries and
//! keeps a process's logger levels in step with it, restoring inherited
//! levels when an override disappears.

pub mod admin;
pub mod backend;
pub mod config;
pub mod error;
pub mod level;
pub mod lifecycle;
pub mod observability;
pub mod reconcile;
pub mod source;

pub use backend::LoggingSystem;
pub use error::ReconcileError;
pub use level::{Level, LoggerName};
pub use reconcile::LogLevelReconciler;
pub use source::{RemoteConfigSource, Snapshot};
