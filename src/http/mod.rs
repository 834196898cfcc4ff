//! Upstream HTTP subsystem.
//!
//! # Data Flow
//! ```text
//! Component asks for a URL
//!     → fetcher.rs (attempt 1..=max_attempts)
//!         → backoff sleep (attempt ≥ 2)
//!         → GET with per-attempt deadline
//!         → non-2xx / timeout / transport → AttemptError
//!         → events.rs (FetchAttempt → AttemptObserver)
//!     → FetchResponse, or FetchError::ExhaustedRetries(last AttemptError)
//! ```

pub mod events;
pub mod fetcher;
pub mod types;

pub use events::{AttemptObserver, AttemptOutcome, FetchAttempt, RecordingObserver, TracingObserver};
pub use fetcher::Fetcher;
pub use types::{AttemptError, FetchError, FetchOptions, FetchResponse, FetchResult};
