//! Request orchestration subsystem.
//!
//! # Data Flow
//! ```text
//! InboundRequest (from http::request)
//!     → orchestrator.rs  Received → Extracting → Delivering → Synthesizing → Responded
//!         Extracting   → envelope::ContentExtractor
//!         Delivering   → delivery::DeliveryChain
//!         Synthesizing → synthesizer.rs
//!     → ProxyResponse (to http::response)
//! ```
//!
//! # Design Decisions
//! - Every value here is request-scoped; nothing is shared or mutated across requests
//! - The orchestrator never returns an error: every path ends in a ProxyResponse
//! - Content type of every ProxyResponse is `text/xml; charset=utf-8`

pub mod orchestrator;
pub mod synthesizer;
pub mod types;

pub use orchestrator::{Orchestrator, Stage};
pub use synthesizer::synthesize;
pub use types::{InboundRequest, ProxyResponse, XML_CONTENT_TYPE};
