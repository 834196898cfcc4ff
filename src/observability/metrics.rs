//! Metrics collection.
//!
//! # Metrics
//! - `explorer_fetch_attempts_total` (counter): HTTP attempts by outcome
//! - `explorer_fetch_attempt_duration_seconds` (histogram): per-attempt latency
//! - `explorer_block_pages_total` (counter): block transaction pages fetched
//! - `explorer_block_page_transactions` (histogram): transactions per page
//! - `explorer_payments_reported` (gauge): payments in the last report
//!
//! # Design Decisions
//! - Recorded through the `metrics` facade; without an installed recorder
//!   every call is a no-op, so embedders choose the exporter

use std::time::Duration;

use metrics::{counter, gauge, histogram};

/// Record one fetch attempt.
pub fn record_fetch_attempt(outcome: &'static str, elapsed: Duration) {
    counter!("explorer_fetch_attempts_total", "outcome" => outcome).increment(1);
    histogram!("explorer_fetch_attempt_duration_seconds").record(elapsed.as_secs_f64());
}

/// Record one block transaction page.
pub fn record_block_page(transactions: usize) {
    counter!("explorer_block_pages_total").increment(1);
    histogram!("explorer_block_page_transactions").record(transactions as f64);
}

/// Record the size of a payment report.
pub fn record_payments_reported(count: usize) {
    gauge!("explorer_payments_reported").set(count as f64);
}
