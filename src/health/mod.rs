//! Health reporting subsystem.
//!
//! # Data Flow
//! ```text
//! GET /status
//!     → status.rs (Uptime since process start, wall-clock timestamp)
//!     → JSON StatusReport
//! ```
//!
//! # Design Decisions
//! - Uptime comes from a monotonic clock, so it never decreases
//! - The report says nothing about the upstream; it only proves the process serves

pub mod status;

pub use status::{StatusReport, Uptime};
