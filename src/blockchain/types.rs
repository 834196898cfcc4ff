//! Chain data types and error definitions.
//!
//! Upstream JSON is narrowed to the fields below; everything else is dropped
//! at deserialization. Numeric fields are unsigned integers, so negative,
//! fractional or string-typed values are rejected at the boundary.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::http::{FetchError, FetchResponse};

/// Block metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockMeta {
    /// Block hash.
    pub id: String,
    pub height: u64,
    /// Unix seconds.
    pub timestamp: u64,
    /// Transaction count declared by upstream.
    pub tx_count: u64,
    /// Size in bytes.
    pub size: u64,
}

/// One transaction output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxOutput {
    /// Absent for scripts without an address form (e.g. OP_RETURN).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scriptpubkey_address: Option<String>,
    /// Value in satoshis.
    pub value: u64,
}

/// Confirmation status of a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxStatus {
    pub confirmed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_height: Option<u64>,
}

impl TxStatus {
    pub fn unconfirmed() -> Self {
        Self {
            confirmed: false,
            block_height: None,
        }
    }

    pub fn confirmed_at(block_height: u64) -> Self {
        Self {
            confirmed: true,
            block_height: Some(block_height),
        }
    }

    /// Block height, only when confirmed with a known height.
    pub fn confirmed_height(&self) -> Option<u64> {
        if self.confirmed {
            self.block_height
        } else {
            None
        }
    }
}

/// A transaction as reported by the upstream API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub txid: String,
    pub vout: Vec<TxOutput>,
    pub status: TxStatus,
}

/// Errors that can occur while reading chain data.
#[derive(Debug, Error)]
pub enum ExplorerError {
    /// The fetcher gave up; carries its error unmodified.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// Response arrived but its content is not what the endpoint promises.
    #[error("invalid response from {url}: {reason}")]
    InvalidResponse { url: String, reason: String },

    /// Response has the wrong JSON shape (e.g. object where an array is required).
    #[error("unexpected response shape from {url}: expected {expected}, got {found}")]
    UnexpectedShape {
        url: String,
        expected: &'static str,
        found: &'static str,
    },

    /// Upstream deployment does not serve this endpoint.
    #[error("endpoint not supported by upstream: {url} (HTTP {status})")]
    UnsupportedEndpoint { url: String, status: u16 },

    /// Base URL cannot be extended with API paths.
    #[error("invalid API base URL `{0}`")]
    InvalidBaseUrl(String),
}

/// Result type for chain operations.
pub type ExplorerResult<T> = Result<T, ExplorerError>;

impl ExplorerError {
    pub(crate) fn invalid(url: &str, reason: impl Into<String>) -> Self {
        ExplorerError::InvalidResponse {
            url: url.to_string(),
            reason: reason.into(),
        }
    }
}

/// Deserialize a JSON body into `T`.
pub(crate) fn parse_json<T: DeserializeOwned>(response: &FetchResponse) -> ExplorerResult<T> {
    serde_json::from_str(&response.body)
        .map_err(|e| ExplorerError::invalid(&response.url, e.to_string()))
}

/// Deserialize a JSON array of transactions.
pub(crate) fn parse_transactions(response: &FetchResponse) -> ExplorerResult<Vec<Transaction>> {
    let value: Value = parse_json(response)?;
    if !value.is_array() {
        return Err(ExplorerError::UnexpectedShape {
            url: response.url.clone(),
            expected: "array",
            found: json_kind(&value),
        });
    }

    serde_json::from_value(value).map_err(|e| ExplorerError::invalid(&response.url, e.to_string()))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
