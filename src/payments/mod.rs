//! Address payment module.

pub mod aggregator;
pub mod types;

pub use aggregator::PaymentAggregator;
pub use types::{format_btc, Payment, PaymentsReport};
