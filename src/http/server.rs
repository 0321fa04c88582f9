//! HTTP server setup and the per-request pipeline.
//!
//! # Responsibilities
//! - Create Axum Router with the catch-all proxy handler
//! - Wire up middleware (shared-secret gate, tracing)
//! - Run each request through path validation, translation, forwarding
//!   and relay
//! - Serve until the shutdown signal fires

use std::sync::Arc;
use std::time::Instant;

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware,
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::trace::TraceLayer;

use crate::config::ProxyConfig;
use crate::error::ProxyError;
use crate::http::request::InboundRequest;
use crate::http::response::relay;
use crate::lifecycle::shutdown;
use crate::observability::metrics;
use crate::routing::PathTranslator;
use crate::security::{auth_gate_middleware, AuthGate};
use crate::upstream::{ForwardingClient, HyperTransport, Transport, TransportError};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState<T> {
    pub translator: Arc<PathTranslator>,
    pub forwarder: ForwardingClient<T>,
    pub max_body_bytes: usize,
}

/// HTTP server for the proxy.
pub struct HttpServer {
    router: Router,
    config: ProxyConfig,
}

impl HttpServer {
    /// Create a server forwarding over the pooled HTTPS client.
    pub fn new(config: ProxyConfig) -> Result<Self, TransportError> {
        let transport = HyperTransport::new(&config.upstream)?;
        Ok(Self::with_transport(config, transport))
    }

    /// Create a server forwarding over `transport`.
    pub fn with_transport<T: Transport>(config: ProxyConfig, transport: T) -> Self {
        let state = AppState {
            translator: Arc::new(PathTranslator::default()),
            forwarder: ForwardingClient::new(transport, &config.upstream),
            max_body_bytes: config.security.max_body_bytes,
        };
        let gate = AuthGate::new(config.security.shared_secret.as_deref());

        let router = build_router(state, gate);
        Self { router, config }
    }

    /// The router, for driving the pipeline without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server, accepting connections on the given listener until
    /// `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            max_retries = self.config.upstream.max_retries,
            timeout_secs = self.config.upstream.timeout_seconds,
            gated = self.config.security.shared_secret.is_some(),
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown::notified(shutdown))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Build the Axum router with all middleware layers.
pub fn build_router<T: Transport>(state: AppState<T>, gate: AuthGate) -> Router {
    Router::new()
        .route("/{*path}", any(proxy_handler::<T>))
        .route("/", any(proxy_handler::<T>))
        .with_state(state)
        .layer(middleware::from_fn_with_state(gate, auth_gate_middleware))
        .layer(TraceLayer::new_for_http())
}

/// Main proxy handler. The shared-secret gate has already run.
async fn proxy_handler<T: Transport>(
    State(state): State<AppState<T>>,
    request: Request<Body>,
) -> Response {
    let start_time = Instant::now();
    let method = request.method().to_string();

    let response = match forward_request(&state, request).await {
        Ok(response) => response,
        Err(error) => {
            tracing::debug!(error = %error, "Request resolved locally");
            error.into_response()
        }
    };

    metrics::record_request(&method, response.status().as_u16(), start_time);
    response
}

async fn forward_request<T: Transport>(
    state: &AppState<T>,
    request: Request<Body>,
) -> Result<Response, ProxyError> {
    let inbound = InboundRequest::from_request(request, state.max_body_bytes).await?;
    let target = state
        .translator
        .translate(&inbound.path, inbound.query.as_deref());

    tracing::debug!(
        method = %inbound.method,
        path = %inbound.path,
        target = %target,
        "Proxying request"
    );

    let upstream = state.forwarder.forward(&inbound, &target).await?;
    Ok(relay(upstream))
}
