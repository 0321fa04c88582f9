//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request:
//!     → auth.rs (shared-secret gate, 407 on mismatch)
//!     → Pass to path validation and routing
//!
//! Upstream request:
//!     → headers.rs (drop Host/PROXYKEY/hop-by-hop, set User-Agent, strip Roblox-Id)
//! ```
//!
//! # Design Decisions
//! - Fail closed: a configured secret is required on every request
//! - No trust in client input: caller identity headers never reach upstream

pub mod auth;
pub mod headers;

pub use auth::{auth_gate_middleware, AuthGate};
pub use headers::outbound_headers;
