//! Logging system backends.
//!
//! # Responsibilities
//! - Set a level on a named logger
//! - Enumerate the loggers the backend currently knows
//! - Report the level explicitly configured on a logger, if any
//!
//! Implementations:
//! - memory.rs: plain map, used for embedding and tests
//! - subscriber.rs: hierarchy-aware `tracing_subscriber` filtering layer

pub mod memory;
pub mod subscriber;

use std::collections::BTreeSet;

use crate::level::{Level, LoggerName};

/// Mutable view of a hierarchical logging system.
///
/// Calls are expected to be local and non-blocking.
pub trait LoggingSystem: Send + Sync {
    fn set_level(&self, name: &LoggerName, level: Level);

    fn known_logger_names(&self) -> BTreeSet<LoggerName>;

    /// Level set directly on `name`; `None` when it only inherits.
    fn configured_level(&self, name: &LoggerName) -> Option<Level>;
}

impl<T: LoggingSystem + ?Sized> LoggingSystem for std::sync::Arc<T> {
    fn set_level(&self, name: &LoggerName, level: Level) {
        (**self).set_level(name, level)
    }

    fn known_logger_names(&self) -> BTreeSet<LoggerName> {
        (**self).known_logger_names()
    }

    fn configured_level(&self, name: &LoggerName) -> Option<Level> {
        (**self).configured_level(name)
    }
}

pub use memory::InMemoryLoggingSystem;
pub use subscriber::{LoggerHierarchy, TracingLoggingSystem};
