//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber once at startup
//! - Console output always; JSON file output when a log directory is configured
//!
//! # Design Decisions
//! - Log level from `RUST_LOG`, falling back to the CLI level
//! - File sink rotates daily and writes through a non-blocking worker

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::ObservabilityConfig;

/// Filter used when `RUST_LOG` is unset.
pub fn default_filter(level: &str) -> EnvFilter {
    EnvFilter::new(format!("soap_middleware={},tower_http={}", level, level))
}

/// Initialize logging. Keep the returned guard alive to flush the file sink.
pub fn init_logging(config: &ObservabilityConfig, level: &str) -> Option<WorkerGuard> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter(level));

    let file_appender = config.log_dir.as_deref().and_then(|dir| {
        RollingFileAppender::builder()
            .rotation(Rotation::DAILY)
            .filename_prefix("soap-middleware")
            .filename_suffix("log")
            .build(Path::new(dir))
            .map_err(|e| eprintln!("File logging unavailable in {}: {}", dir, e))
            .ok()
    });

    match file_appender {
        Some(appender) => {
            let (non_blocking, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer())
                .with(fmt::layer().json().with_writer(non_blocking).with_ansi(false))
                .init();
            Some(guard)
        }
        None => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer())
                .init();
            None
        }
    }
}
