//! Payment report types.

use serde::{Deserialize, Serialize};

/// Satoshis per bitcoin.
pub const SATS_PER_BTC: u64 = 100_000_000;

/// An incoming payment to one address, derived from a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    pub txid: String,
    /// Sum of outputs paying the address.
    pub amount_sats: u64,
    /// Same amount as fixed 8-decimal BTC.
    pub amount_btc: String,
    /// 0 while unconfirmed.
    pub confirmations: u64,
}

impl Payment {
    pub fn new(txid: impl Into<String>, amount_sats: u64, confirmations: u64) -> Self {
        Self {
            txid: txid.into(),
            amount_sats,
            amount_btc: format_btc(amount_sats),
            confirmations,
        }
    }
}

/// Result of the payment flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentsReport {
    pub address: String,
    pub tip_height: u64,
    pub payments: Vec<Payment>,
}

/// Format satoshis as BTC with exactly eight decimals, without floats.
pub fn format_btc(sats: u64) -> String {
    format!("{}.{:08}", sats / SATS_PER_BTC, sats % SATS_PER_BTC)
}
