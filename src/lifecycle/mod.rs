//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Load config → Validate → Logging → Panic hook → Bind listener → Serve
//!
//! Shutdown (shutdown.rs):
//!     Signal received → Broadcast → Stop accepting → Drain in-flight requests → Exit
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → Trigger graceful shutdown
//! ```
//!
//! # Design Decisions
//! - Fail fast at startup: bad config or an unbindable port is fatal
//! - After startup nothing is fatal: panics are logged and the process keeps serving

pub mod shutdown;
pub mod signals;
pub mod startup;

pub use shutdown::Shutdown;
