//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, shared-secret gate, tracing)
//!     → request.rs (trim and validate path, buffer body)
//!     → [routing layer computes the target URL]
//!     → [upstream layer forwards with retries]
//!     → response.rs (relay status, headers, body)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::InboundRequest;
pub use server::HttpServer;
