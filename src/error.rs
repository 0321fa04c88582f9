//! Request-level error taxonomy.
//!
//! Every variant resolves to a local HTTP response; nothing here is fatal to
//! the process. Upstream 4xx/5xx responses are not errors and never reach
//! this type.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

pub const MISSING_PROXY_KEY_BODY: &str = "Missing or invalid PROXYKEY header.";
pub const MALFORMED_PATH_BODY: &str = "URL format invalid.";
pub const BODY_TOO_LARGE_BODY: &str = "Request body too large.";
pub const BODY_READ_FAILED_BODY: &str = "Failed to read request body.";
pub const FORWARDING_FAILED_BODY: &str = "Proxy failed to connect. Please try again.";

#[derive(Debug, thiserror::Error)]
pub enum ProxyError {
    /// The shared secret is configured and the caller did not present it.
    #[error("missing or invalid PROXYKEY header")]
    MissingProxyKey,

    /// The path is empty after trimming, or cannot form an upstream URL.
    #[error("malformed request path: {0:?}")]
    MalformedPath(String),

    /// The inbound body exceeded the configured buffer limit.
    #[error("request body exceeds {limit} bytes")]
    BodyTooLarge { limit: usize },

    /// The inbound body could not be read (e.g. the caller hung up mid-upload).
    #[error("failed to read request body: {0}")]
    BodyRead(String),

    /// Every forwarding attempt failed at the transport level.
    #[error("forwarding to {target} failed after {attempts} attempts")]
    ForwardingExhausted { target: String, attempts: u32 },
}

impl ProxyError {
    pub fn status(&self) -> StatusCode {
        match self {
            ProxyError::MissingProxyKey => StatusCode::PROXY_AUTHENTICATION_REQUIRED,
            ProxyError::MalformedPath(_) => StatusCode::BAD_REQUEST,
            ProxyError::BodyTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            ProxyError::BodyRead(_) => StatusCode::BAD_REQUEST,
            ProxyError::ForwardingExhausted { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn body(&self) -> &'static str {
        match self {
            ProxyError::MissingProxyKey => MISSING_PROXY_KEY_BODY,
            ProxyError::MalformedPath(_) => MALFORMED_PATH_BODY,
            ProxyError::BodyTooLarge { .. } => BODY_TOO_LARGE_BODY,
            ProxyError::BodyRead(_) => BODY_READ_FAILED_BODY,
            ProxyError::ForwardingExhausted { .. } => FORWARDING_FAILED_BODY,
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        (self.status(), self.body()).into_response()
    }
}
