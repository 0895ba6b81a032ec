//! SOAP envelope handling subsystem.
//!
//! # Data Flow
//! ```text
//! Inbound body (bytes)
//!     → extract.rs (locate wrapper tag, unescape, trim)
//!     → ExtractedPayload handed to the delivery chain
//!
//! Delivery outcome
//!     → template.rs (response envelope / fault envelope)
//!     → xml.rs (entity escaping for embedded text)
//! ```
//!
//! # Design Decisions
//! - Extraction is total: no match means pass-through, never an error
//! - Escaping order is fixed (`&` first) so generated entities are never re-escaped
//! - Templates are plain strings; no DOM is built for outbound envelopes

pub mod extract;
pub mod template;
pub mod xml;

pub use extract::ContentExtractor;
pub use template::{fault_envelope, response_envelope};
