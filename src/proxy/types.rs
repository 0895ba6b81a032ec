//! Request-scoped values.

use axum::body::Bytes;
use tokio::time::Instant;
use uuid::Uuid;

pub use crate::delivery::attempt::XML_CONTENT_TYPE;

/// An inbound call as received. Never mutated after construction.
#[derive(Debug, Clone)]
pub struct InboundRequest {
    pub request_id: String,
    pub raw_body: Bytes,
    pub declared_content_type: Option<String>,
    pub action_header: Option<String>,
    pub received_at: Instant,
}

impl InboundRequest {
    /// Capture a request now, with a fresh correlation id.
    pub fn new(raw_body: impl Into<Bytes>) -> Self {
        Self {
            request_id: Uuid::new_v4().to_string(),
            raw_body: raw_body.into(),
            declared_content_type: None,
            action_header: None,
            received_at: Instant::now(),
        }
    }

    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = request_id.into();
        self
    }

    pub fn with_content_type(mut self, content_type: Option<String>) -> Self {
        self.declared_content_type = content_type;
        self
    }

    pub fn with_action(mut self, action: Option<String>) -> Self {
        self.action_header = action;
        self
    }

    /// Body decoded as UTF-8, replacing invalid sequences.
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.raw_body).into_owned()
    }
}

/// The single artifact returned to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyResponse {
    pub status: u16,
    pub content_type: &'static str,
    pub body: String,
}

impl ProxyResponse {
    pub fn xml(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            content_type: XML_CONTENT_TYPE,
            body: body.into(),
        }
    }
}
