//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! defaults
//!     → loader.rs (optional TOML file, then environment overlay)
//!     → validation.rs (semantic checks)
//!     → ProxyConfig (validated, immutable)
//!     → cloned into every subsystem at startup
//! ```
//!
//! # Design Decisions
//! - Config is read once at startup and never mutated
//! - All fields have defaults to allow minimal configs
//! - Environment variables win over the file
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{ListenerConfig, ObservabilityConfig, ProxyConfig, SecurityConfig, UpstreamConfig};
