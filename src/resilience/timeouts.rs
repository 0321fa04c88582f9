//! Timeout enforcement.
//!
//! # Responsibilities
//! - Wrap each upstream attempt with its deadline
//! - Cancel the attempt cleanly on timeout
//!
//! # Design Decisions
//! - Uses Tokio's timeout facilities
//! - Dropping the timed-out future releases its pooled connection
//! - A timeout is a transport error and counts toward the retry budget

use std::future::Future;
use std::time::Duration;

use crate::upstream::TransportError;

/// Run `attempt`, failing with [`TransportError::TimedOut`] once `limit` passes.
pub async fn bounded<T, F>(limit: Duration, attempt: F) -> Result<T, TransportError>
where
    F: Future<Output = Result<T, TransportError>>,
{
    match tokio::time::timeout(limit, attempt).await {
        Ok(result) => result,
        Err(_) => Err(TransportError::TimedOut(limit)),
    }
}
