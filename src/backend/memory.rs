//! In-memory logging system.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::backend::LoggingSystem;
use crate::level::{Level, LoggerName};

/// Map of known loggers to their explicitly configured level.
#[derive(Debug, Default)]
pub struct InMemoryLoggingSystem {
    loggers: Mutex<BTreeMap<LoggerName, Option<Level>>>,
}

impl InMemoryLoggingSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make a logger known without configuring a level on it.
    pub fn register(&self, name: impl Into<LoggerName>) {
        self.lock().entry(name.into()).or_insert(None);
    }

    /// Level in force for `name`: its own, else the nearest configured ancestor's.
    pub fn effective_level(&self, name: &LoggerName) -> Option<Level> {
        let loggers = self.lock();
        std::iter::once(name.clone())
            .chain(name.ancestors())
            .find_map(|n| loggers.get(&n).copied().flatten())
    }

    fn lock(&self) -> MutexGuard<'_, BTreeMap<LoggerName, Option<Level>>> {
        self.loggers.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl LoggingSystem for InMemoryLoggingSystem {
    fn set_level(&self, name: &LoggerName, level: Level) {
        self.lock().insert(name.clone(), Some(level));
    }

    fn known_logger_names(&self) -> BTreeSet<LoggerName> {
        self.lock().keys().cloned().collect()
    }

    fn configured_level(&self, name: &LoggerName) -> Option<Level> {
        self.lock().get(name).copied().flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_level_walks_ancestors() {
        let logging = InMemoryLoggingSystem::new();
        logging.set_level(&LoggerName::root(), Level::Warn);
        logging.set_level(&LoggerName::new("a"), Level::Debug);
        logging.register("a.b.c");

        assert_eq!(logging.effective_level(&LoggerName::new("a.b.c")), Some(Level::Debug));
        assert_eq!(logging.effective_level(&LoggerName::new("z")), Some(Level::Warn));
        assert_eq!(logging.configured_level(&LoggerName::new("a.b.c")), None);
        assert_eq!(logging.known_logger_names().len(), 3);
    }
}
