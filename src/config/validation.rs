//! Configuration validation.
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: MiddlewareConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use thiserror::Error;
use url::Url;

use crate::config::schema::MiddlewareConfig;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("upstream.target_url {0:?} is not an absolute http(s) URL")]
    TargetUrl(String),

    #[error("endpoint.path {0:?} must start with '/'")]
    EndpointPath(String),

    #[error("endpoint.path {0:?} collides with a built-in route")]
    ReservedPath(String),

    #[error("listener.port must be non-zero")]
    Port,

    #[error("upstream.timeout_ms must be greater than zero")]
    Timeout,

    #[error("limits.max_body_bytes must be greater than zero")]
    BodyLimit,

    #[error("extraction.wrapper_tag {0:?} is not a valid element name")]
    WrapperTag(String),

    #[error("observability.metrics_address {0:?} is not a socket address")]
    MetricsAddress(String),
}

/// Validate a parsed configuration.
pub fn validate_config(config: &MiddlewareConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let target = &config.upstream.target_url;
    match Url::parse(target) {
        Ok(url) if matches!(url.scheme(), "http" | "https") && url.has_host() => {}
        _ => errors.push(ValidationError::TargetUrl(target.clone())),
    }

    if !config.endpoint.path.starts_with('/') {
        errors.push(ValidationError::EndpointPath(config.endpoint.path.clone()));
    } else if config.endpoint.path == "/status" {
        errors.push(ValidationError::ReservedPath(config.endpoint.path.clone()));
    }

    if config.listener.port == 0 {
        errors.push(ValidationError::Port);
    }

    if config.upstream.timeout_ms == 0 {
        errors.push(ValidationError::Timeout);
    }

    if config.limits.max_body_bytes == 0 {
        errors.push(ValidationError::BodyLimit);
    }

    if !is_element_name(&config.extraction.wrapper_tag) {
        errors.push(ValidationError::WrapperTag(config.extraction.wrapper_tag.clone()));
    }

    if config.observability.metrics_enabled
        && config
            .observability
            .metrics_address
            .parse::<std::net::SocketAddr>()
            .is_err()
    {
        errors.push(ValidationError::MetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn is_element_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.' | ':'))
}
