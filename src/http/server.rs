//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (tracing, body limit, request ID)
//! - Bind server to listener
//! - Dispatch SOAP posts to the orchestrator
//! - Serve the endpoint info text, WSDL and status routes

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Bytes,
    extract::{DefaultBodyLimit, State},
    http::{HeaderMap, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    limit::RequestBodyLimitLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::config::MiddlewareConfig;
use crate::delivery::transport::{HttpTransport, UpstreamTransport};
use crate::health::status::{get_status, Uptime};
use crate::http::request::{inbound_request, is_accepted_content_type, wants_wsdl};
use crate::http::response::{client_fault, not_found, plain_text};
use crate::http::wsdl::WsdlSource;
use crate::proxy::orchestrator::Orchestrator;

/// Errors while assembling the server.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Failed to build upstream client: {0}")]
    Client(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<Orchestrator>,
    pub config: Arc<MiddlewareConfig>,
    pub wsdl: Arc<WsdlSource>,
    pub uptime: Uptime,
}

/// HTTP server for the SOAP middleware.
pub struct HttpServer {
    router: Router,
    config: Arc<MiddlewareConfig>,
}

impl HttpServer {
    /// Create a new HTTP server delivering through reqwest.
    pub fn new(config: MiddlewareConfig) -> Result<Self, ServerError> {
        let transport = HttpTransport::new(
            Duration::from_millis(config.upstream.connect_timeout_ms),
            config.upstream.use_system_proxy,
        )?;
        let client = transport.client().clone();
        Ok(Self::with_transport(config, Arc::new(transport), client))
    }

    /// Create a server with a caller-supplied transport.
    ///
    /// `client` is only used to fetch the upstream WSDL.
    pub fn with_transport(
        config: MiddlewareConfig,
        transport: Arc<dyn UpstreamTransport>,
        client: reqwest::Client,
    ) -> Self {
        let config = Arc::new(config);
        let orchestrator = Arc::new(Orchestrator::from_config(&config, transport));
        let wsdl = Arc::new(WsdlSource::new(
            &config.endpoint.wsdl_file,
            &config.upstream.target_url,
            client,
            Duration::from_millis(config.upstream.timeout_ms),
        ));

        let state = AppState {
            orchestrator,
            config: config.clone(),
            wsdl,
            uptime: Uptime::start(),
        };

        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &MiddlewareConfig, state: AppState) -> Router {
        let endpoint = post(soap_handler).get(endpoint_info).fallback(not_found);

        Router::new()
            .route(&config.endpoint.path, endpoint)
            .route("/status", get(get_status))
            .fallback(not_found)
            .with_state(state)
            .layer(DefaultBodyLimit::disable())
            .layer(RequestBodyLimitLayer::new(config.limits.max_body_bytes))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
            .layer(
                TraceLayer::new_for_http()
                    .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                    .on_response(DefaultOnResponse::new().level(Level::INFO)),
            )
    }

    /// The assembled router, for in-process use.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until the shutdown channel fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            endpoint = %self.config.endpoint.path,
            target = %self.config.upstream.target_url,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// SOAP endpoint: extract, deliver, synthesize.
async fn soap_handler(State(state): State<AppState>, headers: HeaderMap, body: Bytes) -> Response {
    let inbound = inbound_request(&headers, body);

    if !is_accepted_content_type(inbound.declared_content_type.as_deref()) {
        tracing::warn!(
            request_id = %inbound.request_id,
            content_type = ?inbound.declared_content_type,
            "Rejected unsupported content type"
        );
        return client_fault(
            StatusCode::UNSUPPORTED_MEDIA_TYPE.as_u16(),
            "Unsupported content type; expected text/* or application/*",
        )
        .into_response();
    }

    state.orchestrator.handle(inbound).await.into_response()
}

/// `GET <endpoint>`: WSDL when asked for, info text otherwise.
async fn endpoint_info(State(state): State<AppState>, uri: Uri) -> Response {
    if wants_wsdl(uri.query()) {
        return state.wsdl.respond().await;
    }
    plain_text(StatusCode::OK, state.config.endpoint.info_message.clone())
}
