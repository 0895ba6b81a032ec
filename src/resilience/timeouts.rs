//! Timeout enforcement.
//!
//! # Responsibilities
//! - Decide the time limit of each delivery attempt
//! - Track a request-wide deadline when the shared policy is selected
//!
//! # Design Decisions
//! - Uses Tokio's clock so paused-time tests are deterministic
//! - `PerAttempt`: every attempt gets the full timeout (worst case 3x)
//! - `SharedDeadline`: attempts draw from one budget; an empty budget ends the ladder

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::time::Instant;

/// How the upstream timeout applies across the delivery ladder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeoutPolicy {
    #[default]
    PerAttempt,
    SharedDeadline,
}

/// Time budget for one request's delivery attempts.
#[derive(Debug, Clone, Copy)]
pub struct AttemptBudget {
    policy: TimeoutPolicy,
    timeout: Duration,
    deadline: Instant,
}

impl AttemptBudget {
    /// Start the clock for a new request.
    pub fn start(policy: TimeoutPolicy, timeout: Duration) -> Self {
        Self {
            policy,
            timeout,
            deadline: Instant::now() + timeout,
        }
    }

    /// Limit for the next attempt, or `None` if the budget is spent.
    pub fn next_limit(&self) -> Option<Duration> {
        match self.policy {
            TimeoutPolicy::PerAttempt => Some(self.timeout),
            TimeoutPolicy::SharedDeadline => {
                let remaining = self.deadline.saturating_duration_since(Instant::now());
                if remaining.is_zero() {
                    None
                } else {
                    Some(remaining)
                }
            }
        }
    }
}
