//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, retries > 0, port present)
//! - Reject header values that could never be sent upstream
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ProxyConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use axum::http::HeaderValue;

use crate::config::schema::ProxyConfig;

/// A single semantic problem with a configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("upstream.timeout_seconds must be at least 1")]
    ZeroTimeout,
    #[error("upstream.max_retries must be at least 1")]
    ZeroRetries,
    #[error("listener.listen_port must not be empty")]
    EmptyPort,
    #[error("upstream.user_agent is not a valid header value: {0:?}")]
    InvalidUserAgent(String),
    #[error("security.shared_secret must not be empty when set")]
    EmptySecret,
    #[error("security.max_body_bytes must be at least 1")]
    ZeroBodyLimit,
    #[error("observability.metrics_address is not a socket address: {0:?}")]
    InvalidMetricsAddress(String),
}

/// Check every semantic constraint and collect the failures.
pub fn validate_config(config: &ProxyConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.upstream.timeout_seconds == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }
    if config.upstream.max_retries == 0 {
        errors.push(ValidationError::ZeroRetries);
    }
    if config.listener.listen_port.trim().is_empty() {
        errors.push(ValidationError::EmptyPort);
    }
    if HeaderValue::from_str(&config.upstream.user_agent).is_err() {
        errors.push(ValidationError::InvalidUserAgent(
            config.upstream.user_agent.clone(),
        ));
    }
    if matches!(config.security.shared_secret.as_deref(), Some("")) {
        errors.push(ValidationError::EmptySecret);
    }
    if config.security.max_body_bytes == 0 {
        errors.push(ValidationError::ZeroBodyLimit);
    }
    if let Some(addr) = &config.observability.metrics_address {
        if addr.parse::<SocketAddr>().is_err() {
            errors.push(ValidationError::InvalidMetricsAddress(addr.clone()));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
