//! Response synthesis.
//!
//! # Responsibilities
//! - Forward upstream replies verbatim, or wrap 2xx bodies in a response envelope
//! - Treat an upstream error reply as authoritative
//! - Produce a `soap:Server` fault for pure transport failures

use crate::delivery::outcome::{DeliveryFailure, DeliveryOutcome};
use crate::envelope::template::{
    fault_envelope, response_envelope, SERVER_FAULT_CODE, TRANSPORT_FAULT_DETAIL,
};
use crate::proxy::types::ProxyResponse;

/// Turn a delivery outcome into the caller-facing response.
pub fn synthesize(outcome: DeliveryOutcome, wrap_in_envelope: bool) -> ProxyResponse {
    match outcome {
        DeliveryOutcome::Success { status, body } => {
            if wrap_in_envelope {
                ProxyResponse::xml(200, response_envelope(&body))
            } else {
                ProxyResponse::xml(status, body)
            }
        }
        DeliveryOutcome::Failure(DeliveryFailure {
            upstream_status: Some(status),
            upstream_body,
            ..
        }) => ProxyResponse::xml(status, upstream_body.unwrap_or_default()),
        DeliveryOutcome::Failure(failure) => transport_fault(&failure.message),
    }
}

/// 500 fault envelope for a failure with no upstream reply.
pub fn transport_fault(message: &str) -> ProxyResponse {
    ProxyResponse::xml(
        500,
        fault_envelope(SERVER_FAULT_CODE, message, TRANSPORT_FAULT_DETAIL),
    )
}
