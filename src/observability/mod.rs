//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events, stderr)
//!     → metrics.rs (counters, gauges, histograms)
//!
//! Per-attempt fetch events:
//!     http::TracingObserver → log line + metrics
//! ```
//!
//! # Design Decisions
//! - Structured logging (JSON) for machine parsing
//! - Run ID (UUID v4) span wraps every CLI invocation
//! - Diagnostics never share stdout with result objects

pub mod logging;
pub mod metrics;

pub use logging::{init_logging, LoggingError};
