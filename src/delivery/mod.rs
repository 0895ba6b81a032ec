//! Upstream delivery subsystem.
//!
//! # Data Flow
//! ```text
//! ExtractedPayload + original body + action value
//!     → attempt.rs (ladder entry → DeliveryAttempt: body, content type, SOAPAction)
//!     → chain.rs (try entries in order, bounded by resilience::timeouts)
//!     → transport.rs (one POST to the configured target URL)
//!     → outcome.rs (Success / Failure, exactly one per request)
//! ```
//!
//! # Design Decisions
//! - The ladder order is fixed: raw XML, form field, original body as raw XML
//! - Only transport failures advance the ladder; any HTTP status is terminal
//! - No memory of which encoding worked; every request starts at the top
//! - The transport is a trait so the chain can be driven without a network

pub mod attempt;
pub mod chain;
pub mod outcome;
pub mod transport;

pub use attempt::{DeliveryAttempt, Encoding, PayloadSource, Strategy, STRATEGY_LADDER};
pub use chain::{DeliveryChain, DeliveryRequest};
pub use outcome::{DeliveryFailure, DeliveryOutcome};
pub use transport::{HttpTransport, TransportError, UpstreamReply, UpstreamTransport};
