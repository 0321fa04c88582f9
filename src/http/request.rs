//! Request handling and validation.
//!
//! # Responsibilities
//! - Validate the request path (non-empty after trimming `/`)
//! - Buffer the body once, bounded by the configured limit
//! - Capture everything forwarding needs in an owned `InboundRequest`
//!
//! # Design Decisions
//! - The path is checked before the body is read, so malformed requests
//!   never pay for a body upload
//! - The raw (still percent-encoded) path is kept for the upstream URL

use axum::{
    body::{Body, Bytes},
    http::{HeaderMap, Method, Request},
};
use http_body_util::{BodyExt, LengthLimitError, Limited};

use crate::error::ProxyError;

/// Everything the pipeline needs from one inbound request.
#[derive(Debug, Clone)]
pub struct InboundRequest {
    pub method: Method,
    /// Path with leading and trailing `/` removed; never empty.
    pub path: String,
    pub query: Option<String>,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl InboundRequest {
    /// Validate the path, then buffer the body.
    pub async fn from_request(req: Request<Body>, max_body_bytes: usize) -> Result<Self, ProxyError> {
        let (parts, body) = req.into_parts();
        let path = trim_path(parts.uri.path())?.to_string();

        let body = Limited::new(body, max_body_bytes)
            .collect()
            .await
            .map_err(|e| {
                if e.is::<LengthLimitError>() {
                    ProxyError::BodyTooLarge { limit: max_body_bytes }
                } else {
                    ProxyError::BodyRead(e.to_string())
                }
            })?
            .to_bytes();

        Ok(Self {
            method: parts.method,
            path,
            query: parts.uri.query().map(str::to_string),
            headers: parts.headers,
            body,
        })
    }
}

/// Strip leading and trailing `/`; an empty remainder is malformed.
pub fn trim_path(path: &str) -> Result<&str, ProxyError> {
    let trimmed = path.trim_matches('/');
    if trimmed.is_empty() {
        Err(ProxyError::MalformedPath(path.to_string()))
    } else {
        Ok(trimmed)
    }
}
