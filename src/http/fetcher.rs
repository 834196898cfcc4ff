//! Resilient fetcher: one logical GET with timeout and bounded retries.
//!
//! # Responsibilities
//! - Enforce a hard per-attempt deadline on response headers; the body is
//!   read within whatever remains of it
//! - Treat non-2xx statuses as failures (status + truncated body kept)
//! - Retry with pure exponential backoff until the budget is spent
//! - Report every attempt to the configured observer
//!
//! # Design Decisions
//! - No state survives between calls; each `fetch` is a fresh retry sequence
//! - A timeout aborts only the current attempt, never the retry loop
//! - Once a non-2xx status is known the attempt is an HTTP error, even if
//!   its diagnostic body never arrives
//! - No sleep before the first attempt or after the last one

use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::time;

use crate::config::ClientConfig;
use crate::http::events::{AttemptObserver, AttemptOutcome, FetchAttempt, TracingObserver};
use crate::http::types::{
    truncate_body, AttemptError, FetchError, FetchOptions, FetchResponse, FetchResult,
    MAX_ERROR_BODY_CHARS,
};
use crate::resilience::RetryPolicy;

/// HTTP GET client with timeout and retry semantics.
#[derive(Clone)]
pub struct Fetcher {
    client: reqwest::Client,
    policy: RetryPolicy,
    observer: Arc<dyn AttemptObserver>,
}

impl Fetcher {
    /// Create a fetcher around an existing client, logging attempts through tracing.
    pub fn new(client: reqwest::Client, policy: RetryPolicy) -> Self {
        Self {
            client,
            policy,
            observer: Arc::new(TracingObserver),
        }
    }

    /// Build the HTTP client and retry policy from configuration.
    pub fn from_config(config: &ClientConfig) -> FetchResult<Self> {
        let client = reqwest::Client::builder()
            .user_agent(config.api.user_agent.clone())
            .build()
            .map_err(|e| FetchError::Client(e.to_string()))?;

        Ok(Self::new(client, RetryPolicy::from(&config.retries)))
    }

    /// Replace the attempt observer.
    pub fn with_observer(mut self, observer: Arc<dyn AttemptObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// The policy applied by [`Fetcher::fetch`].
    pub fn policy(&self) -> RetryPolicy {
        self.policy
    }

    /// Fetch `url` under the fetcher's own retry policy.
    pub async fn fetch(&self, url: &str, options: &FetchOptions) -> FetchResult<FetchResponse> {
        self.fetch_with_policy(url, options, self.policy).await
    }

    /// Fetch `url` under an explicit retry policy.
    pub async fn fetch_with_policy(
        &self,
        url: &str,
        options: &FetchOptions,
        policy: RetryPolicy,
    ) -> FetchResult<FetchResponse> {
        let max_attempts = policy.attempts();
        let mut attempt = 1;

        loop {
            let backoff = policy.backoff_before(attempt);
            if !backoff.is_zero() {
                time::sleep(backoff).await;
            }

            let started = Instant::now();
            let result = self.attempt(url, options, policy.timeout).await;
            self.report(url, attempt, backoff, started.elapsed(), &result);

            match result {
                Ok(response) => return Ok(response),
                Err(_) if attempt < max_attempts => attempt += 1,
                Err(last) => {
                    return Err(FetchError::ExhaustedRetries {
                        url: url.to_string(),
                        attempts: attempt,
                        last,
                    })
                }
            }
        }
    }

    async fn attempt(
        &self,
        url: &str,
        options: &FetchOptions,
        timeout: Duration,
    ) -> Result<FetchResponse, AttemptError> {
        let deadline = time::Instant::now() + timeout;
        let timed_out = || AttemptError::Timeout {
            timeout_ms: u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
        };

        let request = self.client.get(url).headers(options.headers.clone());
        let response = match time::timeout_at(deadline, request.send()).await {
            Ok(Ok(response)) => response,
            Ok(Err(e)) => return Err(AttemptError::Transport(describe(&e))),
            Err(_) => return Err(timed_out()),
        };

        let status = response.status();
        if !status.is_success() {
            // Body is diagnostic only; a failed or stalled read leaves it empty.
            let body = match time::timeout_at(deadline, response.text()).await {
                Ok(Ok(body)) => truncate_body(&body, MAX_ERROR_BODY_CHARS),
                _ => String::new(),
            };
            return Err(AttemptError::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }

        let body = match time::timeout_at(deadline, response.text()).await {
            Ok(Ok(body)) => body,
            Ok(Err(e)) => {
                return Err(AttemptError::Transport(format!(
                    "reading body: {}",
                    describe(&e)
                )))
            }
            Err(_) => return Err(timed_out()),
        };

        Ok(FetchResponse {
            url: url.to_string(),
            status: status.as_u16(),
            body,
        })
    }

    fn report(
        &self,
        url: &str,
        attempt: u32,
        backoff: Duration,
        elapsed: Duration,
        result: &Result<FetchResponse, AttemptError>,
    ) {
        let (outcome, error) = match result {
            Ok(response) => (
                AttemptOutcome::Success {
                    status: response.status,
                },
                None,
            ),
            Err(err @ AttemptError::Timeout { .. }) => {
                (AttemptOutcome::Timeout, Some(err.to_string()))
            }
            Err(err @ AttemptError::Transport(_)) => {
                (AttemptOutcome::TransportError, Some(err.to_string()))
            }
            Err(err @ AttemptError::HttpStatus { status, .. }) => (
                AttemptOutcome::HttpError { status: *status },
                Some(err.to_string()),
            ),
        };

        self.observer.on_attempt(&FetchAttempt {
            url: url.to_string(),
            attempt,
            backoff,
            elapsed,
            outcome,
            error,
        });
    }
}

impl fmt::Debug for Fetcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Fetcher")
            .field("policy", &self.policy)
            .finish()
    }
}

/// reqwest's top-level message omits the cause; append the source chain.
fn describe(err: &reqwest::Error) -> String {
    let mut message = err.to_string();
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
