//! Result of running the delivery ladder.

use crate::delivery::transport::UpstreamReply;

/// Terminal result of one delivery. Exactly one per request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryOutcome {
    /// The upstream answered with a 2xx status.
    Success { status: u16, body: String },
    /// The upstream answered with an error status, or could not be reached.
    Failure(DeliveryFailure),
}

/// Why a delivery did not succeed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryFailure {
    pub is_transport_error: bool,
    pub upstream_status: Option<u16>,
    pub upstream_body: Option<String>,
    pub message: String,
}

impl DeliveryFailure {
    /// No HTTP exchange completed.
    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            is_transport_error: true,
            upstream_status: None,
            upstream_body: None,
            message: message.into(),
        }
    }

    /// The upstream completed the exchange with a non-2xx status.
    pub fn upstream(status: u16, body: String) -> Self {
        Self {
            is_transport_error: false,
            upstream_status: Some(status),
            upstream_body: Some(body),
            message: format!("Upstream responded with status {}", status),
        }
    }
}

impl DeliveryOutcome {
    /// Classify a completed exchange.
    pub fn from_reply(reply: UpstreamReply) -> Self {
        if (200..300).contains(&reply.status) {
            DeliveryOutcome::Success {
                status: reply.status,
                body: reply.body,
            }
        } else {
            DeliveryOutcome::Failure(DeliveryFailure::upstream(reply.status, reply.body))
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, DeliveryOutcome::Success { .. })
    }

    /// Status reported by the upstream, if an exchange completed.
    pub fn upstream_status(&self) -> Option<u16> {
        match self {
            DeliveryOutcome::Success { status, .. } => Some(*status),
            DeliveryOutcome::Failure(failure) => failure.upstream_status,
        }
    }
}
