//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the proxy.
//! All types derive Serde `Deserialize` for loading from config files.

use std::time::Duration;

use serde::Deserialize;

/// Root configuration for the proxy.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ProxyConfig {
    /// Listener configuration (bind host, port).
    pub listener: ListenerConfig,

    /// Upstream forwarding settings (timeouts, retries, pooling).
    pub upstream: UpstreamConfig,

    /// Access gate and inbound limits.
    pub security: SecurityConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Interface to bind (e.g., "0.0.0.0").
    pub bind_host: String,

    /// Listening port. Kept as a string to mirror the `PORT` variable.
    pub listen_port: String,
}

impl ListenerConfig {
    /// Address handed to the TCP listener.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.bind_host, self.listen_port)
    }
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_host: "0.0.0.0".to_string(),
            listen_port: "8080".to_string(),
        }
    }
}

/// Upstream forwarding configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Per-attempt deadline in seconds.
    pub timeout_seconds: u64,

    /// Maximum forwarding attempts before the synthetic 500.
    pub max_retries: u32,

    /// How long an idle pooled connection is kept alive, in seconds.
    pub idle_timeout_secs: u64,

    /// Value sent as `User-Agent` on every upstream request.
    pub user_agent: String,
}

impl UpstreamConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    pub fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.idle_timeout_secs)
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: 5,
            max_retries: 5,
            idle_timeout_secs: 60,
            user_agent: "RoProxy".to_string(),
        }
    }
}

/// Access gate and request limits.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Required value of the `PROXYKEY` header. `None` leaves the proxy open.
    pub shared_secret: Option<String>,

    /// Maximum buffered inbound body size in bytes.
    pub max_body_bytes: usize,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            shared_secret: None,
            max_body_bytes: 4 * 1024 * 1024, // 4MB
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error) used when `RUST_LOG` is unset.
    pub log_level: String,

    /// Prometheus scrape endpoint bind address. Metrics export is off when unset.
    pub metrics_address: Option<String>,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_address: None,
        }
    }
}
