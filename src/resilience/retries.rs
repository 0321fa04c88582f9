//! Retry logic.
//!
//! # Responsibilities
//! - Bound the number of forwarding attempts per request
//! - Decide the next state after a failed attempt
//!
//! # State Machine
//! ```text
//! Attempting(1) ─ok──▶ Succeeded
//!      │ transport error
//!      ▼
//! Attempting(n+1) ... Attempting(max) ─error──▶ Failed
//! ```
//!
//! # Design Decisions
//! - Only transport errors retry; any received response is a success
//! - No backoff or jitter: the next attempt starts immediately
//! - Explicit loop with a counter, never recursion

/// Where a request is in its forwarding lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptState<T> {
    /// Attempt number `n` (1-based) is about to run.
    Attempting(u32),
    /// An upstream response was received.
    Succeeded(T),
    /// The attempt budget is spent.
    Failed { attempts: u32 },
}

/// Upper bound on forwarding attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
}

impl RetryPolicy {
    /// `max_attempts` below 1 is raised to 1 so every request is tried once.
    pub fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn start<T>(&self) -> AttemptState<T> {
        AttemptState::Attempting(1)
    }

    /// State after attempt `attempt` failed at the transport level.
    pub fn after_failure<T>(&self, attempt: u32) -> AttemptState<T> {
        if attempt < self.max_attempts {
            AttemptState::Attempting(attempt + 1)
        } else {
            AttemptState::Failed { attempts: attempt }
        }
    }
}
