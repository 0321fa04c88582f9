//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Request to upstream:
//!     → timeouts.rs (enforce per-attempt deadline)
//!     → On transport failure: retries.rs (next attempt or give up)
//! ```
//!
//! # Design Decisions
//! - Timeouts are non-negotiable; every upstream call has a deadline
//! - Retries are sequential within a request and never delayed
//! - Upstream status codes never trigger a retry

pub mod retries;
pub mod timeouts;

pub use retries::{AttemptState, RetryPolicy};
