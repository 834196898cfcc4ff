//! Address payment aggregation.
//!
//! # Algorithm
//! ```text
//! tip height ─┐
//! confirmed ──┼─ concurrently
//! mempool ────┘  (failure → empty set)
//!     → merge by txid, mempool entry wins
//!     → incoming amount = Σ outputs paying the address exactly
//!     → drop amount == 0
//!     → confirmations = tip - block_height + 1, or 0 when unconfirmed
//!     → sort by confirmations desc, amount desc, txid asc
//! ```
//!
//! Only the first page of confirmed history is read; some upstream
//! deployments reject an offset on address history.

use std::cmp::Reverse;
use std::collections::HashMap;

use crate::blockchain::types::{parse_transactions, ExplorerError, ExplorerResult, Transaction};
use crate::blockchain::ChainReader;
use crate::http::{AttemptError, FetchError, FetchOptions};
use crate::observability::metrics;
use crate::payments::types::{Payment, PaymentsReport};

/// Builds incoming-payment reports for addresses.
#[derive(Debug, Clone)]
pub struct PaymentAggregator {
    reader: ChainReader,
}

impl PaymentAggregator {
    pub fn new(reader: ChainReader) -> Self {
        Self { reader }
    }

    /// Incoming payments to `address`, most settled and largest first.
    pub async fn get_payments(&self, address: &str) -> ExplorerResult<PaymentsReport> {
        let (tip_height, confirmed, mempool) = tokio::join!(
            self.reader.get_tip_height(),
            self.fetch_confirmed(address),
            self.fetch_mempool(address),
        );
        let tip_height = tip_height?;
        let confirmed = confirmed?;

        let mempool = match mempool {
            Ok(txs) => txs,
            Err(err) => {
                if matches!(err, ExplorerError::UnsupportedEndpoint { .. }) {
                    tracing::warn!(address, error = %err, "Mempool endpoint unsupported, treating as empty");
                } else {
                    tracing::warn!(address, error = %err, "Mempool fetch failed, treating as empty");
                }
                Vec::new()
            }
        };

        tracing::debug!(
            address,
            tip_height,
            confirmed = confirmed.len(),
            mempool = mempool.len(),
            "Address transactions fetched"
        );

        let merged = merge_transactions(confirmed, mempool);
        let payments = build_payments(merged.values(), address, tip_height);
        metrics::record_payments_reported(payments.len());

        Ok(PaymentsReport {
            address: address.to_string(),
            tip_height,
            payments,
        })
    }

    async fn fetch_confirmed(&self, address: &str) -> ExplorerResult<Vec<Transaction>> {
        let url = self.reader.endpoints().address_txs(address);
        let response = self
            .reader
            .fetcher()
            .fetch(&url, &FetchOptions::accept("application/json"))
            .await?;
        parse_transactions(&response)
    }

    async fn fetch_mempool(&self, address: &str) -> ExplorerResult<Vec<Transaction>> {
        let url = self.reader.endpoints().address_mempool(address);
        let response = self
            .reader
            .fetcher()
            .fetch(&url, &FetchOptions::accept("application/json"))
            .await
            .map_err(|err| classify_mempool_error(url.clone(), err))?;
        parse_transactions(&response)
    }
}

/// 404/405/501 from the mempool endpoint means the deployment lacks it.
fn classify_mempool_error(url: String, err: FetchError) -> ExplorerError {
    match err.last_error() {
        Some(AttemptError::HttpStatus { status, .. }) if matches!(*status, 404 | 405 | 501) => {
            ExplorerError::UnsupportedEndpoint {
                url,
                status: *status,
            }
        }
        _ => ExplorerError::Fetch(err),
    }
}

/// Merge confirmed and mempool views keyed by txid; mempool wins on collision.
pub fn merge_transactions(
    confirmed: Vec<Transaction>,
    mempool: Vec<Transaction>,
) -> HashMap<String, Transaction> {
    let mut merged = HashMap::with_capacity(confirmed.len() + mempool.len());
    for tx in confirmed.into_iter().chain(mempool) {
        merged.insert(tx.txid.clone(), tx);
    }
    merged
}

/// Sum of output values paying exactly `address`.
pub fn incoming_amount(tx: &Transaction, address: &str) -> u64 {
    tx.vout
        .iter()
        .filter(|out| out.scriptpubkey_address.as_deref() == Some(address))
        .fold(0u64, |sum, out| sum.saturating_add(out.value))
}

/// Confirmation count of `tx` at `tip_height`; 0 when unconfirmed.
///
/// A block above the observed tip (tip moved between reads) counts as 1.
pub fn confirmations(tx: &Transaction, tip_height: u64) -> u64 {
    match tx.status.confirmed_height() {
        Some(height) => tip_height.saturating_sub(height).saturating_add(1),
        None => 0,
    }
}

/// Turn transactions into sorted payments, dropping those with nothing incoming.
pub fn build_payments<'a, I>(transactions: I, address: &str, tip_height: u64) -> Vec<Payment>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut payments: Vec<Payment> = transactions
        .into_iter()
        .filter_map(|tx| {
            let amount = incoming_amount(tx, address);
            (amount > 0).then(|| Payment::new(tx.txid.clone(), amount, confirmations(tx, tip_height)))
        })
        .collect();
    sort_payments(&mut payments);
    payments
}

/// Confirmations desc, then amount desc, then txid asc.
pub fn sort_payments(payments: &mut [Payment]) {
    payments.sort_by(|a, b| {
        (Reverse(a.confirmations), Reverse(a.amount_sats), &a.txid).cmp(&(
            Reverse(b.confirmations),
            Reverse(b.amount_sats),
            &b.txid,
        ))
    });
}
