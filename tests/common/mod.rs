//! Shared utilities for integration tests.

use loglevel_sync::backend::InMemoryLoggingSystem;
use loglevel_sync::{Level, LoggerName, LoggingSystem, Snapshot};

/// Build a snapshot from key/value pairs.
#[allow(dead_code)]
pub fn snapshot(entries: &[(&str, &str)]) -> Snapshot {
    entries
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// Logging system with ROOT at INFO and a small known hierarchy.
#[allow(dead_code)]
pub fn seeded_logging() -> InMemoryLoggingSystem {
    let logging = InMemoryLoggingSystem::new();
    logging.set_level(&LoggerName::root(), Level::Info);
    for name in ["a", "a.b", "a.b.c", "db", "db.pool"] {
        logging.register(name);
    }
    logging
}

/// Configured level of `name`.
#[allow(dead_code)]
pub fn level_of(logging: &impl LoggingSystem, name: &str) -> Option<Level> {
    logging.configured_level(&LoggerName::new(name))
}
