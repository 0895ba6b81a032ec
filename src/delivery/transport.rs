//! Upstream transport.
//!
//! # Responsibilities
//! - Send one prepared attempt to the target URL
//! - Return the upstream status and body as opaque text
//! - Report anything short of a completed exchange as a `TransportError`

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::delivery::attempt::DeliveryAttempt;

/// A completed upstream exchange, whatever its status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamReply {
    pub status: u16,
    pub body: String,
}

/// Failures that advance the delivery ladder.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Connection could not be established.
    #[error("Connection failed: {0}")]
    Connect(String),

    /// No reply within the attempt budget.
    #[error("Upstream timed out after {0} ms")]
    Timeout(u64),

    /// Request could not be built or sent.
    #[error("Request failed: {0}")]
    Request(String),

    /// Response body could not be read.
    #[error("Failed to read upstream body: {0}")]
    Body(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_connect() {
            TransportError::Connect(e.to_string())
        } else if e.is_body() || e.is_decode() {
            TransportError::Body(e.to_string())
        } else {
            TransportError::Request(e.to_string())
        }
    }
}

/// Something that can carry an attempt to the upstream.
#[async_trait]
pub trait UpstreamTransport: Send + Sync {
    async fn send(
        &self,
        target_url: &str,
        attempt: &DeliveryAttempt,
    ) -> Result<UpstreamReply, TransportError>;
}

/// reqwest-backed transport used in production.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Build a transport with its own connection pool.
    pub fn new(connect_timeout: Duration, use_system_proxy: bool) -> Result<Self, reqwest::Error> {
        let mut builder = reqwest::Client::builder().connect_timeout(connect_timeout);
        if !use_system_proxy {
            builder = builder.no_proxy();
        }
        Ok(Self {
            client: builder.build()?,
        })
    }

    pub fn client(&self) -> &reqwest::Client {
        &self.client
    }
}

#[async_trait]
impl UpstreamTransport for HttpTransport {
    async fn send(
        &self,
        target_url: &str,
        attempt: &DeliveryAttempt,
    ) -> Result<UpstreamReply, TransportError> {
        let mut request = self.client.post(target_url);
        for (name, value) in &attempt.headers {
            request = request.header(name.as_str(), value.as_str());
        }

        let response = request.body(attempt.body.clone()).send().await?;
        let status = response.status().as_u16();
        let bytes = response.bytes().await?;

        Ok(UpstreamReply {
            status,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        })
    }
}
