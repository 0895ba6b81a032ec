//! Configuration loading from disk and environment.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::MiddlewareConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value for {var}: {value:?}")]
    Env { var: &'static str, value: String },

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Parse a TOML file without validating it.
pub fn read_config(path: &Path) -> Result<MiddlewareConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

/// Load the effective configuration: file (or defaults), then environment, then validation.
pub fn load(path: Option<&Path>) -> Result<MiddlewareConfig, ConfigError> {
    let mut config = match path {
        Some(path) => read_config(path)?,
        None => MiddlewareConfig::default(),
    };

    apply_env_overrides(&mut config, |name| std::env::var(name).ok())?;
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Apply `TARGET_URL`, `PORT`, `SOAP_ACTION`, `WRAP_IN_ENVELOPE` and
/// `UPSTREAM_TIMEOUT_MS` from `lookup`.
pub fn apply_env_overrides<F>(config: &mut MiddlewareConfig, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(url) = lookup("TARGET_URL") {
        config.upstream.target_url = url;
    }

    if let Some(port) = lookup("PORT") {
        config.listener.port = port.trim().parse().map_err(|_| ConfigError::Env {
            var: "PORT",
            value: port.clone(),
        })?;
    }

    if let Some(action) = lookup("SOAP_ACTION") {
        config.upstream.soap_action = action;
    }

    if let Some(wrap) = lookup("WRAP_IN_ENVELOPE") {
        config.response.wrap_in_envelope = match wrap.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" => true,
            "0" | "false" | "no" => false,
            _ => {
                return Err(ConfigError::Env {
                    var: "WRAP_IN_ENVELOPE",
                    value: wrap,
                })
            }
        };
    }

    if let Some(timeout) = lookup("UPSTREAM_TIMEOUT_MS") {
        config.upstream.timeout_ms = timeout.trim().parse().map_err(|_| ConfigError::Env {
            var: "UPSTREAM_TIMEOUT_MS",
            value: timeout.clone(),
        })?;
    }

    Ok(())
}
