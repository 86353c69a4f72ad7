//! Error definitions for log level reconciliation.

use thiserror::Error;

use crate::level::LoggerName;

/// Errors raised while applying a configuration push.
///
/// None of these abort a push as a whole: each is scoped to the single key
/// or logger it names.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReconcileError {
    /// Level text for a `logging.level.*` key could not be parsed.
    #[error("invalid log level {value:?} for key {key:?}")]
    InvalidLevel { key: String, value: String },

    /// A removed override has no ancestor with a configured level.
    #[error("cannot resolve inherited level for logger {0}")]
    UnresolvedInheritance(LoggerName),

    /// The configuration source refused the subscription.
    #[error("failed to register listener for {id:?}: {reason}")]
    ListenerRegistration { id: String, reason: String },
}

impl ReconcileError {
    /// Short label used for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            ReconcileError::InvalidLevel { .. } => "invalid_level",
            ReconcileError::UnresolvedInheritance(_) => "unresolved_inheritance",
            ReconcileError::ListenerRegistration { .. } => "listener_registration",
        }
    }
}

/// Result type for reconciliation operations.
pub type ReconcileResult<T> = Result<T, ReconcileError>;
