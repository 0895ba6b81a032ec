//! Metrics collection and exposition.
//!
//! # Metrics
//! - `soap_middleware_requests_total` (counter): responses by status
//! - `soap_middleware_request_duration_seconds` (histogram): end-to-end latency
//! - `soap_middleware_delivery_attempts_total` (counter): attempts by strategy and result
//!
//! # Design Decisions
//! - Recorded through the `metrics` facade; no-ops until an exporter is installed
//! - Prometheus exporter runs on its own address, off by default

use std::net::SocketAddr;
use std::time::Duration;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter with its own HTTP listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// Record a finished inbound request.
pub fn record_request(status: u16, elapsed: Duration) {
    metrics::counter!("soap_middleware_requests_total", "status" => status.to_string()).increment(1);
    metrics::histogram!("soap_middleware_request_duration_seconds")
        .record(elapsed.as_secs_f64());
}

/// Record one rung of the delivery ladder.
pub fn record_attempt(strategy: &'static str, result: &'static str) {
    metrics::counter!(
        "soap_middleware_delivery_attempts_total",
        "strategy" => strategy,
        "result" => result
    )
    .increment(1);
}
