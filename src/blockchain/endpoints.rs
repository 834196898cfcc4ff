//! Upstream endpoint table.

use url::Url;

use crate::blockchain::types::{ExplorerError, ExplorerResult};

/// Builds request URLs under the configured API base.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    base: Url,
}

impl Endpoints {
    pub fn parse(base_url: &str) -> ExplorerResult<Self> {
        let base = Url::parse(base_url.trim())
            .map_err(|_| ExplorerError::InvalidBaseUrl(base_url.to_string()))?;
        if base.cannot_be_a_base() {
            return Err(ExplorerError::InvalidBaseUrl(base_url.to_string()));
        }
        Ok(Self { base })
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    /// `GET {base}/blocks/tip/height`
    pub fn tip_height(&self) -> String {
        self.join(&["blocks", "tip", "height"])
    }

    /// `GET {base}/blocks/tip/hash`
    pub fn tip_hash(&self) -> String {
        self.join(&["blocks", "tip", "hash"])
    }

    /// `GET {base}/block/{hash}`
    pub fn block(&self, hash: &str) -> String {
        self.join(&["block", hash])
    }

    /// `GET {base}/block/{hash}/txs` for offset 0, `.../txs/{offset}` otherwise.
    pub fn block_txs(&self, hash: &str, offset: usize) -> String {
        if offset == 0 {
            self.join(&["block", hash, "txs"])
        } else {
            self.join(&["block", hash, "txs", &offset.to_string()])
        }
    }

    /// `GET {base}/address/{addr}/txs`
    pub fn address_txs(&self, address: &str) -> String {
        self.join(&["address", address, "txs"])
    }

    /// `GET {base}/address/{addr}/txs/mempool`
    pub fn address_mempool(&self, address: &str) -> String {
        self.join(&["address", address, "txs", "mempool"])
    }

    fn join(&self, segments: &[&str]) -> String {
        let mut url = self.base.clone();
        // cannot_be_a_base was rejected in `parse`
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url.into()
    }
}
