//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Build reconciler → Subscribe to source → Start admin API
//!
//! Shutdown (shutdown.rs):
//!     Ctrl-C received → Broadcast shutdown → Admin API drains → Exit
//! ```
//!
//! # Design Decisions
//! - A failed subscription is not fatal; the daemon runs with static levels
//! - Binding the admin API is fatal: it was explicitly requested

pub mod shutdown;
pub mod startup;

pub use shutdown::Shutdown;
pub use startup::{start, Daemon, StartupError};
