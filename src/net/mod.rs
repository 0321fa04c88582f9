//! Network layer subsystem.
//!
//! # Data Flow
//! ```text
//! ListenerConfig (bind_host, listen_port)
//!     → listener.rs (bind, fatal on failure)
//!     → Hand off to HTTP layer (axum::serve accept loop)
//! ```
//!
//! # Design Decisions
//! - Admission control and per-connection concurrency belong to the HTTP layer
//! - TLS termination happens in front of the proxy, not here

pub mod listener;

pub use listener::{bind, ListenerError};
