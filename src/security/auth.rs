//! Shared-secret gate.
//!
//! When a secret is configured, every request must carry it verbatim in the
//! `PROXYKEY` header. The gate runs before path validation and forwarding.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{HeaderMap, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::error::ProxyError;

/// Header carrying the caller's copy of the shared secret.
pub const PROXY_KEY_HEADER: &str = "proxykey";

/// Validates the `PROXYKEY` header against the configured secret.
#[derive(Debug, Clone, Default)]
pub struct AuthGate {
    secret: Option<Arc<str>>,
}

impl AuthGate {
    pub fn new(secret: Option<&str>) -> Self {
        Self {
            secret: secret.map(Arc::from),
        }
    }

    pub fn check(&self, headers: &HeaderMap) -> Result<(), ProxyError> {
        let Some(secret) = self.secret.as_deref() else {
            return Ok(());
        };

        match headers.get(PROXY_KEY_HEADER) {
            Some(value) if value.as_bytes() == secret.as_bytes() => Ok(()),
            _ => Err(ProxyError::MissingProxyKey),
        }
    }
}

/// Axum middleware wrapping [`AuthGate::check`].
pub async fn auth_gate_middleware(
    State(gate): State<AuthGate>,
    req: Request<Body>,
    next: Next,
) -> Response {
    if let Err(rejection) = gate.check(req.headers()) {
        tracing::debug!(path = %req.uri().path(), "Rejected request without valid PROXYKEY");
        return rejection.into_response();
    }
    next.run(req).await
}
