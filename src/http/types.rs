//! Fetch request/response types and error definitions.

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use thiserror::Error;

/// Maximum number of characters of a non-2xx body kept for diagnostics.
pub const MAX_ERROR_BODY_CHARS: usize = 512;

/// Per-request options layered on top of the client defaults.
#[derive(Debug, Clone, Default)]
pub struct FetchOptions {
    /// Extra headers sent with every attempt.
    pub headers: HeaderMap,
}

impl FetchOptions {
    /// Options carrying a single `Accept` header.
    pub fn accept(value: &'static str) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(value));
        Self { headers }
    }
}

/// A successful (2xx) response with its body fully read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResponse {
    pub url: String,
    pub status: u16,
    pub body: String,
}

/// Failure of a single HTTP attempt.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AttemptError {
    /// Connection-level failure (DNS, refused, reset, body read).
    #[error("transport error: {0}")]
    Transport(String),

    /// Headers (or a 2xx body) did not arrive within the per-attempt deadline.
    #[error("no response within {timeout_ms} ms")]
    Timeout { timeout_ms: u64 },

    /// Upstream answered with a non-2xx status.
    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },
}

/// Errors surfaced by the fetcher to its callers.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Every attempt in the retry budget failed; carries the last failure.
    #[error("{url}: gave up after {attempts} attempt(s): {last}")]
    ExhaustedRetries {
        url: String,
        attempts: u32,
        #[source]
        last: AttemptError,
    },

    /// The HTTP client itself could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    Client(String),
}

impl FetchError {
    /// The last attempt's failure, if the retry budget was spent.
    pub fn last_error(&self) -> Option<&AttemptError> {
        match self {
            FetchError::ExhaustedRetries { last, .. } => Some(last),
            FetchError::Client(_) => None,
        }
    }

    /// HTTP status of the last attempt, when it got that far.
    pub fn status(&self) -> Option<u16> {
        match self.last_error() {
            Some(AttemptError::HttpStatus { status, .. }) => Some(*status),
            _ => None,
        }
    }
}

/// Result type for fetch operations.
pub type FetchResult<T> = Result<T, FetchError>;

/// Truncate `body` to at most `max_chars` characters.
pub fn truncate_body(body: &str, max_chars: usize) -> String {
    match body.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}…", &body[..idx]),
        None => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_body() {
        assert_eq!(truncate_body("short", 10), "short");
        assert_eq!(truncate_body("abcdef", 3), "abc…");
        // multi-byte characters are never split
        assert_eq!(truncate_body("ééé", 2), "éé…");
    }

    #[test]
    fn test_error_display() {
        let err = FetchError::ExhaustedRetries {
            url: "http://x/blocks/tip/height".into(),
            attempts: 3,
            last: AttemptError::HttpStatus {
                status: 503,
                body: "busy".into(),
            },
        };
        assert_eq!(
            err.to_string(),
            "http://x/blocks/tip/height: gave up after 3 attempt(s): HTTP 503: busy"
        );
        assert_eq!(err.status(), Some(503));

        let err = AttemptError::Timeout { timeout_ms: 15_000 };
        assert_eq!(err.to_string(), "no response within 15000 ms");
    }

    #[test]
    fn test_accept_option() {
        let options = FetchOptions::accept("application/json");
        assert_eq!(options.headers[ACCEPT], "application/json");
    }
}
