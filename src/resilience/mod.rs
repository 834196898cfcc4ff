//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Request to upstream API:
//!     → retries.rs (RetryPolicy: attempt budget, per-attempt timeout)
//!     → backoff.rs (delay before attempt n = base × 2^(n-2))
//!     → http::Fetcher applies both around every attempt
//! ```
//!
//! # Design Decisions
//! - Timeouts are non-negotiable; every upstream call has a deadline
//! - Only GET is ever issued, so every request is safe to retry
//! - Pure exponential backoff, no jitter, no cap

pub mod backoff;
pub mod retries;

pub use backoff::calculate_backoff;
pub use retries::RetryPolicy;
