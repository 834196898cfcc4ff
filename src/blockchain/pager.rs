//! Block transaction pager.
//!
//! # Responsibilities
//! - Retrieve the complete ordered transaction set of a block
//! - Walk fixed-size pages strictly in ascending offset order
//!
//! # Design Decisions
//! - A page shorter than `PAGE_SIZE` (including an empty one) ends the walk
//! - A page longer than `PAGE_SIZE` is an invalid response
//! - Offsets advance by exactly `PAGE_SIZE`; upstream rejects anything else
//! - Short politeness delay between pages
//! - Every call starts again from offset 0; partial results are never returned

use std::time::Duration;

use tokio::time::sleep;

use crate::blockchain::client::ChainReader;
use crate::blockchain::endpoints::Endpoints;
use crate::blockchain::types::{parse_transactions, ExplorerError, ExplorerResult, Transaction};
use crate::config::PaginationConfig;
use crate::http::{FetchOptions, Fetcher};
use crate::observability::metrics;

/// Maximum number of transactions upstream returns per page.
pub const PAGE_SIZE: usize = 25;

/// Walks `/block/{hash}/txs[/{offset}]` until a short page.
#[derive(Debug, Clone)]
pub struct BlockTxPager {
    fetcher: Fetcher,
    endpoints: Endpoints,
    page_delay: Duration,
}

impl BlockTxPager {
    pub fn new(fetcher: Fetcher, endpoints: Endpoints, page_delay: Duration) -> Self {
        Self {
            fetcher,
            endpoints,
            page_delay,
        }
    }

    /// Share the reader's fetcher and endpoints.
    pub fn from_reader(reader: &ChainReader, config: &PaginationConfig) -> Self {
        Self::new(
            reader.fetcher().clone(),
            reader.endpoints().clone(),
            Duration::from_millis(config.page_delay_ms),
        )
    }

    /// All transactions of block `hash`, in upstream order.
    pub async fn get_block_transactions(&self, hash: &str) -> ExplorerResult<Vec<Transaction>> {
        let mut transactions = Vec::new();
        let mut offset = 0;

        loop {
            let page = self.fetch_page(hash, offset).await?;
            let page_len = page.len();
            transactions.extend(page);

            tracing::debug!(
                block = %hash,
                offset,
                page_len,
                total = transactions.len(),
                "Block transaction page fetched"
            );

            if page_len < PAGE_SIZE {
                break;
            }

            offset += PAGE_SIZE;
            if !self.page_delay.is_zero() {
                sleep(self.page_delay).await;
            }
        }

        Ok(transactions)
    }

    async fn fetch_page(&self, hash: &str, offset: usize) -> ExplorerResult<Vec<Transaction>> {
        let url = self.endpoints.block_txs(hash, offset);
        let response = self
            .fetcher
            .fetch(&url, &FetchOptions::accept("application/json"))
            .await?;
        let page = parse_transactions(&response)?;
        if page.len() > PAGE_SIZE {
            // the next offset would overlap this page
            return Err(ExplorerError::invalid(
                &url,
                format!(
                    "page holds {} transactions, more than {}",
                    page.len(),
                    PAGE_SIZE
                ),
            ));
        }
        metrics::record_block_page(page.len());
        Ok(page)
    }
}
