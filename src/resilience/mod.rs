//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Delivery chain, before each attempt:
//!     → timeouts.rs (how long may this attempt run?)
//!     → attempt bounded by tokio::time::timeout
//!     → elapsed attempt = transport failure, ladder advances
//! ```
//!
//! # Design Decisions
//! - Every upstream call has a deadline
//! - Per-attempt budgets by default; a shared deadline is opt-in
//! - No retries beyond the fixed delivery ladder

pub mod timeouts;

pub use timeouts::{AttemptBudget, TimeoutPolicy};
