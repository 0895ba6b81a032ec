//! Request handling and transformation.
//!
//! # Responsibilities
//! - Read the request ID assigned by the request-id layer
//! - Decide whether a declared content type is accepted
//! - Build the immutable `InboundRequest` handed to the orchestrator
//!
//! # Design Decisions
//! - Request ID added as early as possible for tracing
//! - Body size ceiling enforced by middleware before the handler runs
//! - Any `text/*` or `application/*` type is accepted; absence is accepted too

use axum::body::Bytes;
use axum::http::{header, HeaderMap};
use uuid::Uuid;

use crate::proxy::types::InboundRequest;

/// Header carrying the correlation ID.
pub const X_REQUEST_ID: &str = "x-request-id";

/// Header carrying the inbound SOAP action.
pub const SOAP_ACTION: &str = "soapaction";

/// Access to the request ID in a header map.
pub trait RequestIdExt {
    fn request_id(&self) -> Option<&str>;
}

impl RequestIdExt for HeaderMap {
    fn request_id(&self) -> Option<&str> {
        self.get(X_REQUEST_ID).and_then(|v| v.to_str().ok())
    }
}

/// Capture an inbound SOAP call.
pub fn inbound_request(headers: &HeaderMap, body: Bytes) -> InboundRequest {
    let request_id = headers
        .request_id()
        .map(str::to_string)
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    InboundRequest::new(body)
        .with_request_id(request_id)
        .with_content_type(header_string(headers, header::CONTENT_TYPE.as_str()))
        .with_action(header_string(headers, SOAP_ACTION))
}

fn header_string(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

/// `text/*` and `application/*` are accepted, as is a missing content type.
pub fn is_accepted_content_type(content_type: Option<&str>) -> bool {
    let Some(content_type) = content_type else {
        return true;
    };
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    essence.starts_with("text/") || essence.starts_with("application/")
}

/// Whether a query string names a `wsdl` parameter, with or without a value.
pub fn wants_wsdl(query: Option<&str>) -> bool {
    query
        .unwrap_or_default()
        .split('&')
        .filter_map(|pair| pair.split('=').next())
        .any(|key| key.eq_ignore_ascii_case("wsdl"))
}
