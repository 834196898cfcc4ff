//! Per-attempt progress events.
//!
//! The fetcher reports every attempt to an [`AttemptObserver`]. Events are a
//! side channel: they never affect what `fetch` returns.

use std::sync::Mutex;
use std::time::Duration;

use crate::observability::metrics;

/// Outcome of one HTTP attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptOutcome {
    Success { status: u16 },
    Timeout,
    TransportError,
    HttpError { status: u16 },
}

impl AttemptOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            AttemptOutcome::Success { .. } => "success",
            AttemptOutcome::Timeout => "timeout",
            AttemptOutcome::TransportError => "transport_error",
            AttemptOutcome::HttpError { .. } => "http_error",
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, AttemptOutcome::Success { .. })
    }
}

/// Transient record of a single attempt.
#[derive(Debug, Clone)]
pub struct FetchAttempt {
    pub url: String,
    /// 1-based attempt ordinal.
    pub attempt: u32,
    /// Delay slept immediately before this attempt.
    pub backoff: Duration,
    /// Time spent on the attempt itself.
    pub elapsed: Duration,
    pub outcome: AttemptOutcome,
    /// Failure detail, absent on success.
    pub error: Option<String>,
}

/// Sink for attempt events.
pub trait AttemptObserver: Send + Sync {
    fn on_attempt(&self, attempt: &FetchAttempt);
}

/// Default observer: structured log line plus metrics.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl AttemptObserver for TracingObserver {
    fn on_attempt(&self, attempt: &FetchAttempt) {
        metrics::record_fetch_attempt(attempt.outcome.as_str(), attempt.elapsed);

        if attempt.outcome.is_success() {
            tracing::debug!(
                url = %attempt.url,
                attempt = attempt.attempt,
                outcome = attempt.outcome.as_str(),
                elapsed_ms = millis(attempt.elapsed),
                "Fetch attempt succeeded"
            );
        } else {
            tracing::warn!(
                url = %attempt.url,
                attempt = attempt.attempt,
                outcome = attempt.outcome.as_str(),
                backoff_ms = millis(attempt.backoff),
                error = attempt.error.as_deref().unwrap_or_default(),
                "Fetch attempt failed"
            );
        }
    }
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

/// Observer that keeps every attempt in memory.
#[derive(Debug, Default)]
pub struct RecordingObserver {
    attempts: Mutex<Vec<FetchAttempt>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the attempts recorded so far.
    pub fn attempts(&self) -> Vec<FetchAttempt> {
        self.attempts
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Backoff slept before each recorded attempt, in order.
    pub fn backoffs(&self) -> Vec<Duration> {
        self.attempts().iter().map(|a| a.backoff).collect()
    }
}

impl AttemptObserver for RecordingObserver {
    fn on_attempt(&self, attempt: &FetchAttempt) {
        self.attempts
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(attempt.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attempt(n: u32, outcome: AttemptOutcome) -> FetchAttempt {
        FetchAttempt {
            url: "http://localhost/blocks/tip/hash".into(),
            attempt: n,
            backoff: Duration::from_millis(u64::from(n) * 10),
            elapsed: Duration::from_millis(1),
            outcome,
            error: None,
        }
    }

    #[test]
    fn test_recording_observer_keeps_order() {
        let observer = RecordingObserver::new();
        observer.on_attempt(&attempt(1, AttemptOutcome::Timeout));
        observer.on_attempt(&attempt(2, AttemptOutcome::Success { status: 200 }));

        let attempts = observer.attempts();
        assert_eq!(attempts.len(), 2);
        assert_eq!(attempts[0].outcome, AttemptOutcome::Timeout);
        assert!(attempts[1].outcome.is_success());
        assert_eq!(
            observer.backoffs(),
            vec![Duration::from_millis(10), Duration::from_millis(20)]
        );
    }

    #[test]
    fn test_millis_saturates() {
        assert_eq!(millis(Duration::from_millis(1_500)), 1_500);
        assert_eq!(millis(Duration::MAX), u64::MAX);
    }

    #[test]
    fn test_outcome_labels() {
        assert_eq!(AttemptOutcome::HttpError { status: 500 }.as_str(), "http_error");
        assert_eq!(AttemptOutcome::TransportError.as_str(), "transport_error");
    }
}
