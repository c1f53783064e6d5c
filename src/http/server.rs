//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the health and proxy handlers
//! - Wire up middleware (CORS, tracing)
//! - Bind server to listener with graceful shutdown
//! - Forward every non-health request to the upstream

use axum::{
    body::{to_bytes, Body},
    extract::State,
    http::Request,
    middleware,
    response::{IntoResponse, Response},
    routing::any,
    Json, Router,
};
use std::sync::Arc;
use std::time::Instant;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::trace::TraceLayer;

use crate::config::GatewayConfig;
use crate::health::{self, HealthReport};
use crate::http::request::make_request_span;
use crate::observability::metrics;
use crate::proxy::{carries_body, ProxyError, UpstreamClient};
use crate::security::{cors, cors_layer};

/// The only path answered locally.
pub const HEALTH_PATH: &str = "/health";

/// Application state injected into handlers. Read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub upstream: Arc<UpstreamClient>,
    /// Cap on inbound payload bodies; `None` reads them whole.
    pub max_body_size: Option<usize>,
}

/// HTTP server for the forwarding gateway.
pub struct HttpServer {
    router: Router,
    config: GatewayConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    ///
    pub fn new(config: GatewayConfig) -> Self {
        let upstream = Arc::new(UpstreamClient::new(&config.upstream));

        let state = AppState {
            upstream,
            max_body_size: config.limits.max_body_size,
        };

        let router = Self::build_router(state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(state: AppState) -> Router {
        Router::new()
            .route(HEALTH_PATH, any(health_handler))
            .route("/", any(proxy_handler))
            .route("/{*path}", any(proxy_handler))
            .with_state(state)
            .layer(middleware::from_fn_with_state(cors_layer(), cors))
            .layer(TraceLayer::new_for_http().make_span_with(make_request_span::<Body>))
    }

    /// A handle to the fully layered router, for in-process use.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            upstream = %self.config.upstream.base_url,
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

/// `/health`: always 200, availability in the body.
async fn health_handler(State(state): State<AppState>) -> Json<HealthReport> {
    Json(health::check(&state.upstream).await)
}

/// Main proxy handler. Relays the upstream answer or an error envelope.
async fn proxy_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start_time = Instant::now();
    let method = request.method().clone();

    tracing::debug!(
        method = %method,
        uri = %request.uri(),
        "Proxying request"
    );

    let response = match forward(&state, request).await {
        Ok(response) => response,
        Err(err) => {
            match &err {
                ProxyError::UpstreamUnavailable { base_url, source, .. } => {
                    tracing::warn!(upstream = %base_url, error = %source, "Upstream unavailable");
                }
                ProxyError::Fault(detail) => {
                    tracing::error!(error = %detail, "Proxy fault");
                }
            }
            err.into_response()
        }
    };

    metrics::record_request(method.as_str(), response.status().as_u16(), start_time);
    response
}

async fn forward(state: &AppState, request: Request<Body>) -> Result<Response, ProxyError> {
    let (parts, body) = request.into_parts();

    let body = if carries_body(&parts.method) {
        let limit = state.max_body_size.unwrap_or(usize::MAX);
        let bytes = to_bytes(body, limit)
            .await
            .map_err(|e| ProxyError::Fault(format!("failed to read request body: {}", e)))?;
        Some(bytes)
    } else {
        None
    };

    state.upstream.forward(&parts, body).await
}
