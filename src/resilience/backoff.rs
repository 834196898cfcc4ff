//! Pure exponential backoff.

use std::time::Duration;

/// Delay to wait before `attempt` (1-based).
///
/// Attempt 1 never waits; attempt `n >= 2` waits `base * 2^(n-2)`.
/// No jitter and no cap.
pub fn calculate_backoff(attempt: u32, base: Duration) -> Duration {
    if attempt < 2 {
        return Duration::ZERO;
    }

    let exponential_base = 2u32.saturating_pow(attempt - 2);
    base.saturating_mul(exponential_base)
}
