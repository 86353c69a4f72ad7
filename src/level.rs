//! Log levels and hierarchical logger names.

use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Severity threshold assigned to a logger.
///
/// Ordered from most to least verbose. `Off` silences a logger entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum Level {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
    Fatal,
    Off,
}

impl Level {
    pub const ALL: [Level; 7] = [
        Level::Trace,
        Level::Debug,
        Level::Info,
        Level::Warn,
        Level::Error,
        Level::Fatal,
        Level::Off,
    ];

    /// Canonical upper-case name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Trace => "TRACE",
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warn => "WARN",
            Level::Error => "ERROR",
            Level::Fatal => "FATAL",
            Level::Off => "OFF",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when level text does not name a known level.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown log level: {0:?}")]
pub struct ParseLevelError(pub String);

impl FromStr for Level {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Level::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ParseLevelError(s.to_string()))
    }
}

impl From<Level> for String {
    fn from(level: Level) -> Self {
        level.as_str().to_string()
    }
}

impl TryFrom<String> for Level {
    type Error = ParseLevelError;

    fn try_from(value: String) -> Result<Self, ParseLevelError> {
        value.parse()
    }
}

/// Dot-delimited logger name, e.g. `com.example.db`.
///
/// `LoggerName::root()` is the top of the hierarchy and has no parent.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct LoggerName(String);

impl LoggerName {
    pub const ROOT: &'static str = "ROOT";
    const SEPARATOR: char = '.';

    /// Build a name. Any letter case of `root` yields the sentinel.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        if name.eq_ignore_ascii_case(Self::ROOT) {
            Self::root()
        } else {
            Self(name)
        }
    }

    pub fn root() -> Self {
        Self(Self::ROOT.to_string())
    }

    pub fn is_root(&self) -> bool {
        self.0 == Self::ROOT
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The next name up the hierarchy, `None` for the root.
    ///
    /// `a.b.c` → `a.b` → `a` → `ROOT`.
    pub fn parent(&self) -> Option<LoggerName> {
        if self.is_root() {
            return None;
        }
        match self.0.rfind(Self::SEPARATOR) {
            Some(idx) => Some(LoggerName::new(&self.0[..idx])),
            None => Some(LoggerName::root()),
        }
    }

    /// Iterator over strict ancestors, nearest first, ending with the root.
    pub fn ancestors(&self) -> impl Iterator<Item = LoggerName> {
        std::iter::successors(self.parent(), |name| name.parent())
    }
}

impl fmt::Display for LoggerName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for LoggerName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for LoggerName {
    fn from(name: &str) -> Self {
        LoggerName::new(name)
    }
}

impl From<String> for LoggerName {
    fn from(name: String) -> Self {
        LoggerName::new(name)
    }
}

impl From<LoggerName> for String {
    fn from(name: LoggerName) -> Self {
        name.0
    }
}
