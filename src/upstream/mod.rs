//! Upstream forwarding subsystem.
//!
//! # Data Flow
//! ```text
//! InboundRequest + TargetDescriptor
//!     → forwarder.rs (outbound headers, retry loop)
//!     → resilience::timeouts (per-attempt deadline)
//!     → client.rs (pooled HTTPS transport, buffered response)
//!     → UpstreamResponse or ForwardingExhausted
//! ```
//!
//! # Design Decisions
//! - One client per process; its pool synchronizes itself
//! - Request-local state only: attempt counter, target, buffers

pub mod client;
pub mod forwarder;

pub use client::{HyperTransport, Transport, TransportError, UpstreamResponse};
pub use forwarder::ForwardingClient;
