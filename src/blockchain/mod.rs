//! Blockchain read subsystem.
//!
//! # Data Flow
//! ```text
//! ClientConfig (base URL)
//!     → endpoints.rs (URL table)
//!     → client.rs (tip height, tip hash, block metadata)
//!     → pager.rs (block transactions, 25 per page)
//!     → snapshot.rs ({height, hash, meta, txs} + count cross-check)
//! ```
//!
//! # Constraints
//! - Read-only: only GET requests are issued
//! - All retry/timeout behaviour comes from `http::Fetcher`
//! - Response content is validated at ingestion, never coerced

pub mod client;
pub mod endpoints;
pub mod pager;
pub mod snapshot;
pub mod types;

pub use client::ChainReader;
pub use endpoints::Endpoints;
pub use pager::{BlockTxPager, PAGE_SIZE};
pub use snapshot::{fetch_block, fetch_latest_block, fetch_tip, ChainSnapshot, ChainTip};
pub use types::{BlockMeta, ExplorerError, ExplorerResult, Transaction, TxOutput, TxStatus};
