//! Delivery strategy chain.
//!
//! # Responsibilities
//! - Walk `STRATEGY_LADDER` in order for one request
//! - Bound each attempt with the budget from `resilience::timeouts`
//! - Stop at the first completed exchange, whatever its status
//! - Turn an exhausted ladder into a transport `DeliveryFailure`

use std::sync::Arc;
use std::time::Duration;

use tokio::time;

use crate::delivery::attempt::STRATEGY_LADDER;
use crate::delivery::outcome::{DeliveryFailure, DeliveryOutcome};
use crate::delivery::transport::{TransportError, UpstreamTransport};
use crate::observability::metrics;
use crate::resilience::timeouts::{AttemptBudget, TimeoutPolicy};

/// Inputs of one delivery.
#[derive(Debug, Clone, Copy)]
pub struct DeliveryRequest<'a> {
    pub request_id: &'a str,
    pub extracted: &'a str,
    pub original: &'a str,
    pub soap_action: &'a str,
}

/// Ordered fallback delivery to a single upstream.
#[derive(Clone)]
pub struct DeliveryChain {
    transport: Arc<dyn UpstreamTransport>,
    target_url: String,
    timeout: Duration,
    policy: TimeoutPolicy,
}

impl DeliveryChain {
    pub fn new(
        transport: Arc<dyn UpstreamTransport>,
        target_url: impl Into<String>,
        timeout: Duration,
        policy: TimeoutPolicy,
    ) -> Self {
        Self {
            transport,
            target_url: target_url.into(),
            timeout,
            policy,
        }
    }

    /// Run the ladder. Always yields exactly one outcome.
    pub async fn deliver(&self, request: DeliveryRequest<'_>) -> DeliveryOutcome {
        let budget = AttemptBudget::start(self.policy, self.timeout);
        let mut last_error: Option<TransportError> = None;

        for (index, strategy) in STRATEGY_LADDER.iter().enumerate() {
            let attempt_no = index + 1;

            let Some(limit) = budget.next_limit() else {
                tracing::warn!(
                    request_id = %request.request_id,
                    attempt = attempt_no,
                    "Shared delivery deadline spent, abandoning remaining strategies"
                );
                last_error = Some(TransportError::Timeout(self.timeout.as_millis() as u64));
                break;
            };

            let attempt = strategy.build(request.extracted, request.original, request.soap_action);

            tracing::info!(
                request_id = %request.request_id,
                attempt = attempt_no,
                strategy = strategy.name,
                target = %self.target_url,
                "Forwarding request upstream"
            );

            match time::timeout(limit, self.transport.send(&self.target_url, &attempt)).await {
                Ok(Ok(reply)) => {
                    metrics::record_attempt(strategy.name, "completed");
                    tracing::info!(
                        request_id = %request.request_id,
                        attempt = attempt_no,
                        strategy = strategy.name,
                        status = reply.status,
                        "Upstream responded"
                    );
                    tracing::debug!(request_id = %request.request_id, body = %reply.body, "Upstream body");
                    return DeliveryOutcome::from_reply(reply);
                }
                Ok(Err(e)) => {
                    metrics::record_attempt(strategy.name, "transport_error");
                    tracing::warn!(
                        request_id = %request.request_id,
                        attempt = attempt_no,
                        strategy = strategy.name,
                        error = %e,
                        "Delivery attempt failed"
                    );
                    last_error = Some(e);
                }
                Err(_) => {
                    metrics::record_attempt(strategy.name, "timeout");
                    let e = TransportError::Timeout(limit.as_millis() as u64);
                    tracing::warn!(
                        request_id = %request.request_id,
                        attempt = attempt_no,
                        strategy = strategy.name,
                        error = %e,
                        "Delivery attempt timed out"
                    );
                    last_error = Some(e);
                }
            }
        }

        let message = match last_error {
            Some(e) => e.to_string(),
            None => "No delivery strategy was attempted".to_string(),
        };
        tracing::error!(request_id = %request.request_id, error = %message, "All delivery strategies failed");
        DeliveryOutcome::Failure(DeliveryFailure::transport(message))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use async_trait::async_trait;

    use crate::delivery::attempt::{DeliveryAttempt, Encoding, FORM_CONTENT_TYPE};
    use crate::delivery::transport::UpstreamReply;

    /// Scripted step for `ScriptedTransport`.
    pub(crate) enum Step {
        Reply(u16, &'static str),
        Refuse,
        Hang,
    }

    /// Transport that replays a script and records every attempt it sees.
    pub(crate) struct ScriptedTransport {
        script: Mutex<VecDeque<Step>>,
        seen: Mutex<Vec<DeliveryAttempt>>,
    }

    impl ScriptedTransport {
        pub(crate) fn new(steps: Vec<Step>) -> Arc<Self> {
            Arc::new(Self {
                script: Mutex::new(steps.into()),
                seen: Mutex::new(Vec::new()),
            })
        }

        pub(crate) fn calls(&self) -> usize {
            self.seen.lock().unwrap().len()
        }

        pub(crate) fn attempts(&self) -> Vec<DeliveryAttempt> {
            self.seen.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl UpstreamTransport for ScriptedTransport {
        async fn send(
            &self,
            _target_url: &str,
            attempt: &DeliveryAttempt,
        ) -> Result<UpstreamReply, TransportError> {
            self.seen.lock().unwrap().push(attempt.clone());
            let step = self.script.lock().unwrap().pop_front();
            match step {
                Some(Step::Reply(status, body)) => Ok(UpstreamReply {
                    status,
                    body: body.to_string(),
                }),
                Some(Step::Hang) => {
                    std::future::pending::<()>().await;
                    unreachable!()
                }
                Some(Step::Refuse) | None => {
                    Err(TransportError::Connect("connection refused".to_string()))
                }
            }
        }
    }

    fn chain(transport: Arc<ScriptedTransport>, policy: TimeoutPolicy) -> DeliveryChain {
        DeliveryChain::new(transport, "http://upstream/svc", Duration::from_millis(100), policy)
    }

    fn request<'a>() -> DeliveryRequest<'a> {
        DeliveryRequest {
            request_id: "test",
            extracted: "<Tx/>",
            original: "<Request>&lt;Tx/&gt;</Request>",
            soap_action: "urn:Execute",
        }
    }

    #[tokio::test]
    async fn test_first_success_short_circuits() {
        let transport = ScriptedTransport::new(vec![Step::Reply(200, "OK")]);
        let outcome = chain(transport.clone(), TimeoutPolicy::PerAttempt).deliver(request()).await;

        assert_eq!(
            outcome,
            DeliveryOutcome::Success { status: 200, body: "OK".into() }
        );
        assert_eq!(transport.calls(), 1);
    }

    #[tokio::test]
    async fn test_upstream_error_status_is_not_retried() {
        let transport = ScriptedTransport::new(vec![
            Step::Reply(500, "<error>bad request</error>"),
            Step::Reply(200, "never"),
        ]);
        let outcome = chain(transport.clone(), TimeoutPolicy::PerAttempt).deliver(request()).await;

        assert_eq!(transport.calls(), 1);
        match outcome {
            DeliveryOutcome::Failure(f) => {
                assert!(!f.is_transport_error);
                assert_eq!(f.upstream_status, Some(500));
                assert_eq!(f.upstream_body.as_deref(), Some("<error>bad request</error>"));
            }
            other => panic!("expected upstream failure, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_transport_failures_walk_the_ladder() {
        let transport = ScriptedTransport::new(vec![Step::Refuse, Step::Refuse, Step::Reply(200, "OK")]);
        let outcome = chain(transport.clone(), TimeoutPolicy::PerAttempt).deliver(request()).await;

        assert!(outcome.is_success());
        let attempts = transport.attempts();
        assert_eq!(attempts.len(), 3);
        assert_eq!(attempts[0].body, "<Tx/>");
        assert_eq!(attempts[1].encoding, Encoding::FormEncoded);
        assert_eq!(attempts[1].content_type(), Some(FORM_CONTENT_TYPE));
        assert_eq!(attempts[2].body, "<Request>&lt;Tx/&gt;</Request>");
        assert!(attempts.iter().all(|a| a.soap_action() == Some("urn:Execute")));
    }

    #[tokio::test]
    async fn test_exhausted_ladder_reports_last_error() {
        let transport = ScriptedTransport::new(vec![Step::Refuse, Step::Refuse, Step::Refuse]);
        let outcome = chain(transport.clone(), TimeoutPolicy::PerAttempt).deliver(request()).await;

        assert_eq!(transport.calls(), 3);
        match outcome {
            DeliveryOutcome::Failure(f) => {
                assert!(f.is_transport_error);
                assert_eq!(f.upstream_status, None);
                assert!(f.message.contains("connection refused"));
            }
            other => panic!("expected transport failure, got {:?}", other),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeouts_advance_the_ladder() {
        let transport = ScriptedTransport::new(vec![Step::Hang, Step::Hang, Step::Reply(200, "OK")]);
        let outcome = chain(transport.clone(), TimeoutPolicy::PerAttempt).deliver(request()).await;

        assert_eq!(
            outcome,
            DeliveryOutcome::Success { status: 200, body: "OK".into() }
        );
        assert_eq!(transport.calls(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_shared_deadline_stops_after_first_timeout() {
        let transport = ScriptedTransport::new(vec![Step::Hang, Step::Reply(200, "late")]);
        let outcome = chain(transport.clone(), TimeoutPolicy::SharedDeadline).deliver(request()).await;

        assert_eq!(transport.calls(), 1);
        match outcome {
            DeliveryOutcome::Failure(f) => {
                assert!(f.is_transport_error);
                assert!(f.message.contains("timed out"));
            }
            other => panic!("expected timeout failure, got {:?}", other),
        }
    }
}
