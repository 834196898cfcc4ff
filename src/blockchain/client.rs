//! Chain state reader.
//!
//! # Responsibilities
//! - Query chain tip (height, hash)
//! - Query per-block metadata
//! - Validate response content; retries are left entirely to the fetcher

use crate::blockchain::endpoints::Endpoints;
use crate::blockchain::types::{parse_json, BlockMeta, ExplorerError, ExplorerResult};
use crate::config::ClientConfig;
use crate::http::{FetchOptions, Fetcher};

const TEXT: &str = "text/plain";
const JSON: &str = "application/json";

/// Reads tip state and block metadata from the upstream API.
#[derive(Debug, Clone)]
pub struct ChainReader {
    fetcher: Fetcher,
    endpoints: Endpoints,
}

impl ChainReader {
    pub fn new(fetcher: Fetcher, endpoints: Endpoints) -> Self {
        Self { fetcher, endpoints }
    }

    /// Build a reader (and its fetcher) from validated configuration.
    pub fn from_config(config: &ClientConfig) -> ExplorerResult<Self> {
        let fetcher = Fetcher::from_config(config)?;
        let endpoints = Endpoints::parse(&config.api.base_url)?;
        Ok(Self::new(fetcher, endpoints))
    }

    pub fn fetcher(&self) -> &Fetcher {
        &self.fetcher
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// Height of the current tip.
    pub async fn get_tip_height(&self) -> ExplorerResult<u64> {
        let url = self.endpoints.tip_height();
        let response = self.fetcher.fetch(&url, &FetchOptions::accept(TEXT)).await?;

        let text = response.body.trim();
        text.parse::<u64>().map_err(|_| {
            ExplorerError::invalid(&url, format!("expected a block height, got `{}`", text))
        })
    }

    /// Hash of the current tip.
    pub async fn get_tip_hash(&self) -> ExplorerResult<String> {
        let url = self.endpoints.tip_hash();
        let response = self.fetcher.fetch(&url, &FetchOptions::accept(TEXT)).await?;

        let hash = response.body.trim();
        if hash.is_empty() {
            return Err(ExplorerError::invalid(&url, "empty block hash"));
        }
        Ok(hash.to_string())
    }

    /// Metadata for the block with `hash`.
    pub async fn get_block_meta(&self, hash: &str) -> ExplorerResult<BlockMeta> {
        let url = self.endpoints.block(hash);
        let response = self.fetcher.fetch(&url, &FetchOptions::accept(JSON)).await?;
        let meta: BlockMeta = parse_json(&response)?;

        tracing::debug!(
            hash = %meta.id,
            height = meta.height,
            tx_count = meta.tx_count,
            "Block metadata fetched"
        );
        Ok(meta)
    }
}
