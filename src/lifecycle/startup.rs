//! Startup helpers.
//!
//! # Responsibilities
//! - Route panics anywhere in the process to the log
//! - Bind the listener from validated configuration

use std::panic;

use tokio::net::TcpListener;

use crate::config::ListenerConfig;

/// Log panics through `tracing` instead of stderr.
///
/// Tokio contains a panicking request task, so the process keeps serving.
pub fn install_panic_hook() {
    panic::set_hook(Box::new(|info| {
        let message = crate::proxy::orchestrator::panic_message(info.payload());
        let location = info
            .location()
            .map(|l| format!("{}:{}", l.file(), l.line()))
            .unwrap_or_else(|| "unknown".to_string());
        tracing::error!(error = %message, location = %location, "Unexpected panic");
    }));
}

/// Bind the configured address.
pub async fn bind_listener(config: &ListenerConfig) -> std::io::Result<TcpListener> {
    let listener = TcpListener::bind(config.bind_address()).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");
    Ok(listener)
}
