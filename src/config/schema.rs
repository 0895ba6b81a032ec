//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the middleware.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

use crate::resilience::timeouts::TimeoutPolicy;

/// Root configuration for the SOAP middleware.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct MiddlewareConfig {
    /// Listener configuration (host, port).
    pub listener: ListenerConfig,

    /// Inbound SOAP endpoint settings.
    pub endpoint: EndpointConfig,

    /// Upstream service settings.
    pub upstream: UpstreamConfig,

    /// Inner payload extraction.
    pub extraction: ExtractionConfig,

    /// Response shaping.
    pub response: ResponseConfig,

    /// Inbound request limits.
    pub limits: LimitsConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Interface to bind.
    pub host: String,

    /// Listening port.
    pub port: u16,
}

impl ListenerConfig {
    /// `host:port` for binding.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

/// The single SOAP endpoint exposed to callers.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct EndpointConfig {
    /// Path accepting SOAP posts.
    pub path: String,

    /// Local WSDL document served for `?wsdl`; the upstream is asked if it is missing.
    pub wsdl_file: String,

    /// Text returned for a plain GET on the endpoint.
    pub info_message: String,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            path: "/Intellect/ExecuteTransaction.asmx".to_string(),
            wsdl_file: "service.wsdl".to_string(),
            info_message: "SOAP middleware is running. POST SOAP requests to this endpoint."
                .to_string(),
        }
    }
}

/// Upstream service configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Absolute URL every delivery attempt is posted to.
    pub target_url: String,

    /// Value of the `SOAPAction` header on every attempt.
    pub soap_action: String,

    /// Prefer a non-empty inbound `SOAPAction` over `soap_action`.
    pub forward_inbound_action: bool,

    /// Timeout for upstream calls in milliseconds.
    pub timeout_ms: u64,

    /// Whether `timeout_ms` applies per attempt or to the whole ladder.
    pub timeout_policy: TimeoutPolicy,

    /// Connection establishment timeout in milliseconds.
    pub connect_timeout_ms: u64,

    /// Honour `HTTP_PROXY`/`HTTPS_PROXY` for upstream calls.
    pub use_system_proxy: bool,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            target_url: "http://localhost:8080/Intellect/ExecuteTransaction.asmx".to_string(),
            soap_action: "http://tempuri.org/Execute".to_string(),
            forward_inbound_action: false,
            timeout_ms: 30_000,
            timeout_policy: TimeoutPolicy::PerAttempt,
            connect_timeout_ms: 5_000,
            use_system_proxy: true,
        }
    }
}

/// Wrapper tag configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Element whose inner text carries the payload.
    pub wrapper_tag: String,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            wrapper_tag: "Request".to_string(),
        }
    }
}

/// Response shaping configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ResponseConfig {
    /// Wrap successful upstream bodies in a SOAP response envelope.
    pub wrap_in_envelope: bool,
}

/// Inbound request limits.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Maximum inbound body size in bytes.
    pub max_body_bytes: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_body_bytes: 5 * 1024 * 1024, // 5MB
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Directory for daily-rolling JSON log files. Console only when unset.
    pub log_dir: Option<String>,

    /// Enable the Prometheus exporter.
    pub metrics_enabled: bool,

    /// Address of the Prometheus exporter.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_dir: None,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = MiddlewareConfig::default();
        assert_eq!(config.listener.port, 3000);
        assert_eq!(config.upstream.timeout_ms, 30_000);
        assert_eq!(config.upstream.timeout_policy, TimeoutPolicy::PerAttempt);
        assert_eq!(config.limits.max_body_bytes, 5 * 1024 * 1024);
        assert_eq!(config.extraction.wrapper_tag, "Request");
        assert!(!config.response.wrap_in_envelope);
        assert_eq!(config.listener.bind_address(), "0.0.0.0:3000");
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: MiddlewareConfig = toml::from_str(
            r#"
            [upstream]
            target_url = "https://soap.example.com/svc.asmx"
            timeout_policy = "shared_deadline"
            "#,
        )
        .unwrap();

        assert_eq!(config.upstream.target_url, "https://soap.example.com/svc.asmx");
        assert_eq!(config.upstream.timeout_policy, TimeoutPolicy::SharedDeadline);
        assert_eq!(config.upstream.timeout_ms, 30_000);
        assert_eq!(config.endpoint.path, "/Intellect/ExecuteTransaction.asmx");
    }
}
