//! Per-request orchestration.
//!
//! # States
//! ```text
//! Received → Extracting → Delivering → Synthesizing → Responded
//! ```
//! Linear; `Delivering` runs the whole ladder and yields one outcome.
//!
//! # Design Decisions
//! - A panic while extracting or delivering becomes a transport failure
//! - Elapsed time is measured from `InboundRequest::received_at`

use std::any::Any;
use std::fmt;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;

use futures_util::FutureExt;

use crate::config::MiddlewareConfig;
use crate::delivery::chain::{DeliveryChain, DeliveryRequest};
use crate::delivery::outcome::{DeliveryFailure, DeliveryOutcome};
use crate::delivery::transport::UpstreamTransport;
use crate::envelope::extract::ContentExtractor;
use crate::observability::metrics;
use crate::proxy::synthesizer::synthesize;
use crate::proxy::types::{InboundRequest, ProxyResponse};

/// Orchestrator state for one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Received,
    Extracting,
    Delivering,
    Synthesizing,
    Responded,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Received => "received",
            Stage::Extracting => "extracting",
            Stage::Delivering => "delivering",
            Stage::Synthesizing => "synthesizing",
            Stage::Responded => "responded",
        };
        f.write_str(name)
    }
}

/// Ties extraction, delivery and synthesis together for each request.
#[derive(Clone)]
pub struct Orchestrator {
    extractor: ContentExtractor,
    chain: DeliveryChain,
    soap_action: String,
    forward_inbound_action: bool,
    wrap_in_envelope: bool,
}

impl Orchestrator {
    pub fn new(extractor: ContentExtractor, chain: DeliveryChain, soap_action: impl Into<String>) -> Self {
        Self {
            extractor,
            chain,
            soap_action: soap_action.into(),
            forward_inbound_action: false,
            wrap_in_envelope: false,
        }
    }

    /// Build from validated configuration and a transport.
    pub fn from_config(config: &MiddlewareConfig, transport: Arc<dyn UpstreamTransport>) -> Self {
        let chain = DeliveryChain::new(
            transport,
            config.upstream.target_url.clone(),
            Duration::from_millis(config.upstream.timeout_ms),
            config.upstream.timeout_policy,
        );

        Self::new(
            ContentExtractor::new(&config.extraction.wrapper_tag),
            chain,
            config.upstream.soap_action.clone(),
        )
        .forward_inbound_action(config.upstream.forward_inbound_action)
        .wrap_in_envelope(config.response.wrap_in_envelope)
    }

    pub fn forward_inbound_action(mut self, enabled: bool) -> Self {
        self.forward_inbound_action = enabled;
        self
    }

    pub fn wrap_in_envelope(mut self, enabled: bool) -> Self {
        self.wrap_in_envelope = enabled;
        self
    }

    /// Action value sent upstream for this request.
    pub fn action_for<'a>(&'a self, request: &'a InboundRequest) -> &'a str {
        match request.action_header.as_deref() {
            Some(action) if self.forward_inbound_action && !action.is_empty() => action,
            _ => &self.soap_action,
        }
    }

    /// Handle one request end to end. Never fails.
    pub async fn handle(&self, request: InboundRequest) -> ProxyResponse {
        let request_id = request.request_id.as_str();
        enter(request_id, Stage::Received);
        tracing::info!(
            request_id = %request_id,
            bytes = request.raw_body.len(),
            content_type = ?request.declared_content_type,
            "New SOAP request received"
        );

        let outcome = AssertUnwindSafe(self.extract_and_deliver(&request))
            .catch_unwind()
            .await
            .unwrap_or_else(|panic| {
                let message = panic_message(panic.as_ref());
                tracing::error!(request_id = %request_id, error = %message, "Request handling panicked");
                DeliveryOutcome::Failure(DeliveryFailure::transport(format!(
                    "Internal middleware error: {}",
                    message
                )))
            });

        enter(request_id, Stage::Synthesizing);
        let response = synthesize(outcome, self.wrap_in_envelope);

        enter(request_id, Stage::Responded);
        let elapsed = request.received_at.elapsed();
        metrics::record_request(response.status, elapsed);
        tracing::info!(
            request_id = %request_id,
            status = response.status,
            duration_ms = elapsed.as_millis() as u64,
            "Request completed"
        );

        response
    }

    async fn extract_and_deliver(&self, request: &InboundRequest) -> DeliveryOutcome {
        let request_id = request.request_id.as_str();

        enter(request_id, Stage::Extracting);
        let original = request.body_text();
        let extracted = self.extractor.extract_text(&original);
        tracing::debug!(
            request_id = %request_id,
            unwrapped = extracted.len() != original.len(),
            body = %extracted,
            "Payload extracted"
        );

        enter(request_id, Stage::Delivering);
        self.chain
            .deliver(DeliveryRequest {
                request_id,
                extracted: &extracted,
                original: &original,
                soap_action: self.action_for(request),
            })
            .await
    }
}

fn enter(request_id: &str, stage: Stage) {
    tracing::debug!(request_id = %request_id, stage = %stage, "Stage entered");
}

pub(crate) fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
