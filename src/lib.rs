//! Resilient block-explorer API client library.

pub mod blockchain;
pub mod config;
pub mod http;
pub mod observability;
pub mod payments;
pub mod resilience;

pub use blockchain::{BlockTxPager, ChainReader, ExplorerError};
pub use config::ClientConfig;
pub use http::Fetcher;
pub use payments::PaymentAggregator;
