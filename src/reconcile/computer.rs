//! Pure diffing of a configuration snapshot against the previous overrides.

use std::collections::{BTreeMap, BTreeSet};

use crate::error::ReconcileError;
use crate::level::{Level, LoggerName};
use crate::source::Snapshot;

/// Key prefix selecting logger level entries in a snapshot.
pub const LEVEL_KEY_PREFIX: &str = "logging.level.";

/// Outcome of comparing one snapshot with the overrides left by the last one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LevelUpdate {
    /// Levels to apply, root first when present.
    pub assignments: Vec<(LoggerName, Level)>,
    /// Previously overridden loggers absent from this snapshot.
    pub removed: BTreeSet<LoggerName>,
    /// Loggers explicitly overridden by this snapshot.
    pub new_overrides: BTreeSet<LoggerName>,
    /// Entries skipped because their level text did not parse.
    pub rejected: Vec<ReconcileError>,
}

/// Map a snapshot key to a logger name, or `None` if it is not a level key.
///
/// The prefix is matched ignoring case; the prefix on its own denotes the root.
pub fn logger_name_for_key(key: &str) -> Option<LoggerName> {
    let head = key.get(..LEVEL_KEY_PREFIX.len())?;
    if !head.eq_ignore_ascii_case(LEVEL_KEY_PREFIX) {
        return None;
    }
    let rest = &key[LEVEL_KEY_PREFIX.len()..];
    if rest.is_empty() {
        Some(LoggerName::root())
    } else {
        Some(LoggerName::new(rest))
    }
}

/// Compute the level changes a snapshot implies.
pub fn compute(previous: &BTreeSet<LoggerName>, snapshot: &Snapshot) -> LevelUpdate {
    let mut keys: Vec<&String> = snapshot.keys().collect();
    keys.sort();

    let mut parsed: BTreeMap<LoggerName, Level> = BTreeMap::new();
    let mut rejected = Vec::new();

    for key in keys {
        let Some(name) = logger_name_for_key(key) else {
            continue;
        };
        let value = &snapshot[key];
        match value.parse::<Level>() {
            Ok(level) => {
                parsed.insert(name, level);
            }
            Err(_) => rejected.push(ReconcileError::InvalidLevel {
                key: key.clone(),
                value: value.clone(),
            }),
        }
    }

    let new_overrides: BTreeSet<LoggerName> = parsed.keys().cloned().collect();
    let removed = previous.difference(&new_overrides).cloned().collect();

    // Root fans out to every logger, so it must land before specific overrides.
    let root = LoggerName::root();
    let mut assignments = Vec::with_capacity(parsed.len());
    if let Some(level) = parsed.remove(&root) {
        assignments.push((root, level));
    }
    assignments.extend(parsed);

    LevelUpdate {
        assignments,
        removed,
        new_overrides,
        rejected,
    }
}
