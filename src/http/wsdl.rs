//! WSDL passthrough.
//!
//! # Responsibilities
//! - Serve the local WSDL document when one is configured and present
//! - Otherwise relay `<target_url>?wsdl` from the upstream
//! - Answer 404 when neither source produces a document

use std::io::ErrorKind;
use std::path::PathBuf;
use std::time::Duration;

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::http::response::plain_text;

/// Errors while locating a WSDL document.
#[derive(Debug, Error)]
pub enum WsdlError {
    #[error("Failed to read local WSDL: {0}")]
    Io(#[from] std::io::Error),

    #[error("Upstream WSDL request failed: {0}")]
    Upstream(#[from] reqwest::Error),

    #[error("Upstream WSDL request returned status {0}")]
    Status(u16),
}

/// Where a served document came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WsdlOrigin {
    Local,
    Upstream,
}

/// Resolves the service description.
#[derive(Debug, Clone)]
pub struct WsdlSource {
    local_path: PathBuf,
    upstream_url: String,
    client: reqwest::Client,
    timeout: Duration,
}

impl WsdlSource {
    /// `timeout` bounds the whole upstream exchange, body included.
    pub fn new(
        local_path: impl Into<PathBuf>,
        target_url: &str,
        client: reqwest::Client,
        timeout: Duration,
    ) -> Self {
        Self {
            local_path: local_path.into(),
            upstream_url: format!("{}?wsdl", target_url),
            client,
            timeout,
        }
    }

    /// Local document first, upstream second.
    pub async fn fetch(&self) -> Result<(String, WsdlOrigin), WsdlError> {
        match tokio::fs::read_to_string(&self.local_path).await {
            Ok(document) => return Ok((document, WsdlOrigin::Local)),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::info!(
                    path = %self.local_path.display(),
                    "Local WSDL not found, requesting from upstream"
                );
            }
            Err(e) => return Err(e.into()),
        }

        let response = self
            .client
            .get(&self.upstream_url)
            .timeout(self.timeout)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(WsdlError::Status(status.as_u16()));
        }
        Ok((response.text().await?, WsdlOrigin::Upstream))
    }

    /// HTTP response for `GET <endpoint>?wsdl`.
    pub async fn respond(&self) -> Response {
        match self.fetch().await {
            Ok((document, origin)) => {
                tracing::info!(origin = ?origin, "WSDL served");
                (
                    StatusCode::OK,
                    [(header::CONTENT_TYPE, "application/xml")],
                    document,
                )
                    .into_response()
            }
            Err(e) => {
                tracing::error!(error = %e, "WSDL unavailable");
                plain_text(StatusCode::NOT_FOUND, "WSDL not found")
            }
        }
    }
}
