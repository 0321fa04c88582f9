//! Configuration loading from disk and the process environment.

use std::fs;
use std::path::Path;

use crate::config::schema::ProxyConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Parse a TOML configuration file. Missing keys fall back to defaults.
pub fn load_file(path: &Path) -> Result<ProxyConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

/// Resolve the effective configuration: defaults, then the optional file,
/// then the process environment. The result is validated before it is returned.
pub fn load_config(path: Option<&Path>) -> Result<ProxyConfig, ConfigError> {
    let base = match path {
        Some(path) => load_file(path)?,
        None => ProxyConfig::default(),
    };

    let config = apply_env(base, |key| std::env::var(key).ok());
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Overlay environment variables onto `config`.
///
/// Integer variables must parse to a value of at least 1; string variables
/// must be non-blank. Anything else leaves the existing value in place.
pub fn apply_env<F>(mut config: ProxyConfig, lookup: F) -> ProxyConfig
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(timeout) = positive_int(&lookup, "TIMEOUT") {
        config.upstream.timeout_seconds = timeout;
    }
    if let Some(retries) = positive_int(&lookup, "RETRIES") {
        config.upstream.max_retries = u32::try_from(retries).unwrap_or(u32::MAX);
    }
    if let Some(port) = non_blank(&lookup, "PORT") {
        config.listener.listen_port = port;
    }
    if let Some(key) = non_blank(&lookup, "KEY") {
        config.security.shared_secret = Some(key);
    }
    if let Some(level) = non_blank(&lookup, "LOG_LEVEL") {
        config.observability.log_level = level;
    }
    if let Some(addr) = non_blank(&lookup, "METRICS_ADDRESS") {
        config.observability.metrics_address = Some(addr);
    }
    config
}

fn non_blank<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    let value = lookup(key)?;
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn positive_int<F>(lookup: &F, key: &str) -> Option<u64>
where
    F: Fn(&str) -> Option<String>,
{
    let parsed = non_blank(lookup, key)?.parse::<u64>().ok()?;
    (parsed >= 1).then_some(parsed)
}
