//! Log level reconciliation.
//!
//! # Data Flow
//! ```text
//! RemoteConfigSource push (full snapshot)
//!     → reconciler.rs (serialize pushes, own override set)
//!     → computer.rs (parse levels, diff against previous overrides)
//!     → LoggingSystem (root fan-out, direct levels, inherited restores)
//! ```
//!
//! # Design Decisions
//! - Snapshots are never deltas; removal is inferred by diffing
//! - Bad entries are skipped one by one, never failing the whole push
//! - Inherited levels are read when an override is removed, not cached

pub mod computer;
pub mod reconciler;

pub use computer::{compute, LevelUpdate, LEVEL_KEY_PREFIX};
pub use reconciler::LogLevelReconciler;
