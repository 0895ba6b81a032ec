//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! optional TOML file (--config)
//!     → loader.rs (parse & deserialize, defaults for missing fields)
//!     → loader.rs (environment overrides: TARGET_URL, PORT, ...)
//!     → validation.rs (semantic checks)
//!     → MiddlewareConfig (validated, immutable)
//!     → shared via Arc to the server and orchestrator
//! ```
//!
//! # Design Decisions
//! - Config is read once at startup; no reload
//! - All fields have defaults so an empty file is a valid config
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{apply_env_overrides, load, read_config, ConfigError};
pub use schema::{
    EndpointConfig, ExtractionConfig, LimitsConfig, ListenerConfig, MiddlewareConfig,
    ObservabilityConfig, ResponseConfig, UpstreamConfig,
};
pub use validation::{validate_config, ValidationError};
