//! Retry policy.
//!
//! # Responsibilities
//! - Hold the attempt budget, per-attempt timeout and backoff unit
//! - Answer how long to wait before a given attempt
//!
//! # Design Decisions
//! - Plain `Copy` value: each fetch takes its own copy, nothing is shared
//! - Every failure kind (transport, timeout, non-2xx) is retryable; the
//!   fetcher stops only when the budget is spent

use std::time::Duration;

use crate::config::RetryConfig;
use crate::resilience::backoff::calculate_backoff;

/// Bounded retry configuration for a single logical request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first.
    pub max_attempts: u32,
    /// Per-attempt deadline: headers must arrive within it, and a 2xx body is
    /// read within what remains.
    pub timeout: Duration,
    /// Backoff unit; attempt `n` waits `base_delay * 2^(n-2)`.
    pub base_delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, timeout: Duration, base_delay: Duration) -> Self {
        Self {
            max_attempts,
            timeout,
            base_delay,
        }
    }

    /// Attempt budget, never less than one.
    pub fn attempts(&self) -> u32 {
        self.max_attempts.max(1)
    }

    /// Delay to sleep before `attempt` (1-based).
    pub fn backoff_before(&self, attempt: u32) -> Duration {
        calculate_backoff(attempt, self.base_delay)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from(&RetryConfig::default())
    }
}

impl From<&RetryConfig> for RetryPolicy {
    fn from(config: &RetryConfig) -> Self {
        Self::new(
            config.max_attempts,
            Duration::from_millis(config.timeout_ms),
            Duration::from_millis(config.base_delay_ms),
        )
    }
}
