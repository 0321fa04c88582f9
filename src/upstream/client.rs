//! Pooled HTTPS client for upstream calls.
//!
//! # Responsibilities
//! - Build the shared connection pool once at startup
//! - Execute one upstream request and buffer its response
//!
//! # Design Decisions
//! - `Transport` is the seam between forwarding logic and the network
//! - The client is cloned into every request; clones share one pool
//! - The whole body is read inside the attempt so a truncated body is retried

use std::future::Future;
use std::time::Duration;

use axum::{
    body::{Body, Bytes},
    http::{HeaderMap, Request, StatusCode},
};
use hyper_rustls::{HttpsConnector, HttpsConnectorBuilder};
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::{TokioExecutor, TokioTimer},
};

use crate::config::UpstreamConfig;

/// Transport-level failure of a single attempt.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("upstream request failed: {0}")]
    Request(#[from] hyper_util::client::legacy::Error),

    #[error("failed to read upstream body: {0}")]
    Body(#[source] axum::Error),

    #[error("upstream attempt timed out after {0:?}")]
    TimedOut(Duration),

    #[error("TLS setup failed: {0}")]
    Tls(#[from] rustls::Error),
}

/// A fully buffered upstream response.
#[derive(Debug, Clone)]
pub struct UpstreamResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

/// Executes one upstream request.
pub trait Transport: Clone + Send + Sync + 'static {
    fn send(
        &self,
        request: Request<Body>,
    ) -> impl Future<Output = Result<UpstreamResponse, TransportError>> + Send;
}

type HttpsClient = Client<HttpsConnector<HttpConnector>, Body>;

/// Transport backed by a keep-alive hyper client over rustls.
#[derive(Clone)]
pub struct HyperTransport {
    client: HttpsClient,
}

impl HyperTransport {
    pub fn new(config: &UpstreamConfig) -> Result<Self, TransportError> {
        let mut http = HttpConnector::new();
        http.enforce_http(false);

        let https = HttpsConnectorBuilder::new()
            .with_provider_and_webpki_roots(rustls::crypto::ring::default_provider())?
            .https_only()
            .enable_http1()
            .wrap_connector(http);

        let client = Client::builder(TokioExecutor::new())
            .pool_idle_timeout(config.idle_timeout())
            .pool_timer(TokioTimer::new())
            .build(https);

        tracing::debug!(
            idle_timeout_secs = config.idle_timeout_secs,
            "Upstream client initialized"
        );

        Ok(Self { client })
    }
}

impl Transport for HyperTransport {
    fn send(
        &self,
        request: Request<Body>,
    ) -> impl Future<Output = Result<UpstreamResponse, TransportError>> + Send {
        let client = self.client.clone();
        async move {
            let response = client.request(request).await?;
            let (parts, body) = response.into_parts();
            let body = axum::body::to_bytes(Body::new(body), usize::MAX)
                .await
                .map_err(TransportError::Body)?;

            Ok(UpstreamResponse {
                status: parts.status,
                headers: parts.headers,
                body,
            })
        }
    }
}
