//! SOAP Middleware
//!
//! A protocol-translating proxy built with Tokio and Axum.
//!
//! # Architecture Overview
//!
//! ```text
//!                        ┌──────────────────────────────────────────────────────┐
//!                        │                   SOAP MIDDLEWARE                     │
//!                        │                                                       │
//!   Caller request       │  ┌─────────┐    ┌───────────┐    ┌──────────────┐    │
//!   ─────────────────────┼─▶│  http   │───▶│  envelope │───▶│   delivery   │────┼──▶ Upstream
//!                        │  │ server  │    │  extract  │    │    chain     │◀───┼─── (one URL)
//!                        │  └─────────┘    └───────────┘    └──────┬───────┘    │
//!                        │       ▲                                 │            │
//!   Caller response      │  ┌────┴────────┐    ┌──────────────┐    │            │
//!   ◀────────────────────┼──│  response   │◀───│ synthesizer  │◀───┘            │
//!                        │  └─────────────┘    └──────────────┘                 │
//!                        │                                                       │
//!                        │  config · health · observability · resilience ·      │
//!                        │  lifecycle                                           │
//!                        └──────────────────────────────────────────────────────┘
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;

use soap_middleware::config;
use soap_middleware::lifecycle::{startup, Shutdown};
use soap_middleware::observability::{logging, metrics};
use soap_middleware::HttpServer;

#[derive(Parser)]
#[command(name = "soap-middleware")]
#[command(about = "Protocol-translating SOAP proxy", long_about = None)]
struct Cli {
    /// TOML configuration file. Defaults plus environment overrides when omitted.
    #[arg(short, long, env = "SOAP_MIDDLEWARE_CONFIG")]
    config: Option<PathBuf>,

    /// Log level used when RUST_LOG is unset.
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = config::load(cli.config.as_deref())?;
    let _log_guard = logging::init_logging(&config.observability, &cli.log_level);
    startup::install_panic_hook();

    tracing::info!("soap-middleware v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        port = config.listener.port,
        endpoint = %config.endpoint.path,
        target = %config.upstream.target_url,
        timeout_ms = config.upstream.timeout_ms,
        timeout_policy = ?config.upstream.timeout_policy,
        wrap_in_envelope = config.response.wrap_in_envelope,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse::<SocketAddr>() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(e) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                error = %e,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = startup::bind_listener(&config.listener).await?;

    let shutdown = Shutdown::new();
    let _signal_task = shutdown.trigger_on_signal();

    let server = HttpServer::new(config)?;
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
