//! Response handling and transformation.
//!
//! # Responsibilities
//! - Write a `ProxyResponse` with its status and fixed XML content type
//! - Produce the non-XML responses of the HTTP surface (404, info text)
//!
//! # Design Decisions
//! - Upstream statuses are forwarded as-is; an unrepresentable one becomes 502

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::envelope::template::{fault_envelope, CLIENT_FAULT_CODE};
use crate::proxy::types::ProxyResponse;

impl IntoResponse for ProxyResponse {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::BAD_GATEWAY);
        (status, [(header::CONTENT_TYPE, self.content_type)], self.body).into_response()
    }
}

/// Fault for requests rejected before delivery.
pub fn client_fault(status: u16, message: &str) -> ProxyResponse {
    ProxyResponse::xml(
        status,
        fault_envelope(CLIENT_FAULT_CODE, message, "Request rejected by middleware"),
    )
}

/// Plain-text response.
pub fn plain_text(status: StatusCode, body: impl Into<String>) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        body.into(),
    )
        .into_response()
}

/// Catch-all for unmatched methods and paths.
pub async fn not_found() -> Response {
    plain_text(StatusCode::NOT_FOUND, "Not Found")
}
