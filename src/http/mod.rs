//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware, route table)
//!     → request.rs (request ID, content-type gate, InboundRequest)
//!     → proxy::Orchestrator (extract, deliver, synthesize)
//!     → response.rs (ProxyResponse → HTTP response)
//!     → Send to client
//!
//! GET <endpoint>?wsdl → wsdl.rs (local file, else upstream ?wsdl)
//! GET /status         → health::status
//! anything else       → 404 plain text
//! ```

pub mod request;
pub mod response;
pub mod server;
pub mod wsdl;

pub use request::{RequestIdExt, X_REQUEST_ID};
pub use server::{AppState, HttpServer, ServerError};
