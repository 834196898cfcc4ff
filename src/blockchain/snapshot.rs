//! Chain-level orchestration: a block together with all of its transactions.

use serde::Serialize;

use crate::blockchain::client::ChainReader;
use crate::blockchain::pager::BlockTxPager;
use crate::blockchain::types::{BlockMeta, ExplorerResult, Transaction};

/// Result of the chain-read flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChainSnapshot {
    pub height: u64,
    pub hash: String,
    pub meta: BlockMeta,
    pub txs: Vec<Transaction>,
}

/// Tip height and hash only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChainTip {
    pub height: u64,
    pub hash: String,
}

/// Read tip height and hash concurrently.
pub async fn fetch_tip(reader: &ChainReader) -> ExplorerResult<ChainTip> {
    let (height, hash) = tokio::try_join!(reader.get_tip_height(), reader.get_tip_hash())?;
    Ok(ChainTip { height, hash })
}

/// The current tip block with all of its transactions.
pub async fn fetch_latest_block(
    reader: &ChainReader,
    pager: &BlockTxPager,
) -> ExplorerResult<ChainSnapshot> {
    let tip = fetch_tip(reader).await?;
    let meta = reader.get_block_meta(&tip.hash).await?;
    let txs = pager.get_block_transactions(&tip.hash).await?;
    check_tx_count(&meta, txs.len());

    Ok(ChainSnapshot {
        height: tip.height,
        hash: tip.hash,
        meta,
        txs,
    })
}

/// A specific block with all of its transactions.
pub async fn fetch_block(
    reader: &ChainReader,
    pager: &BlockTxPager,
    hash: &str,
) -> ExplorerResult<ChainSnapshot> {
    let meta = reader.get_block_meta(hash).await?;
    let txs = pager.get_block_transactions(hash).await?;
    check_tx_count(&meta, txs.len());

    Ok(ChainSnapshot {
        height: meta.height,
        hash: hash.to_string(),
        meta,
        txs,
    })
}

/// Compare paginated total with the declared count. A mismatch is only a
/// warning: reorgs can make the two diverge.
pub fn check_tx_count(meta: &BlockMeta, fetched: usize) -> bool {
    let consistent = u64::try_from(fetched).map_or(false, |n| n == meta.tx_count);
    if !consistent {
        tracing::warn!(
            block = %meta.id,
            declared = meta.tx_count,
            fetched,
            "Fetched transaction count differs from declared count"
        );
    }
    consistent
}
