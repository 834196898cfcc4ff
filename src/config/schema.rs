//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the client.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the explorer client.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ClientConfig {
    /// Upstream API location and network.
    pub api: ApiConfig,

    /// Retry, timeout and backoff settings for every upstream request.
    pub retries: RetryConfig,

    /// Block transaction pagination settings.
    pub pagination: PaginationConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Network variant the upstream service indexes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    Mainnet,
    Testnet,
    Testnet4,
    Signet,
}

impl Network {
    /// Path segment identifying this network in the upstream base URL.
    /// Mainnet is served from the unprefixed root.
    pub fn path_segment(&self) -> Option<&'static str> {
        match self {
            Network::Mainnet => None,
            Network::Testnet => Some("testnet"),
            Network::Testnet4 => Some("testnet4"),
            Network::Signet => Some("signet"),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Network::Mainnet => "mainnet",
            Network::Testnet => "testnet",
            Network::Testnet4 => "testnet4",
            Network::Signet => "signet",
        }
    }
}

impl std::fmt::Display for Network {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Upstream API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the block-explorer API (e.g., "https://mempool.space/testnet4/api").
    pub base_url: String,

    /// Network the base URL must point at.
    pub network: Network,

    /// User-Agent header sent with every request.
    pub user_agent: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://mempool.space/testnet4/api".to_string(),
            network: Network::Testnet4,
            user_agent: concat!("explorer-client/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Retry configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Total attempts per request, including the first.
    pub max_attempts: u32,

    /// Per-attempt deadline for response headers in milliseconds.
    pub timeout_ms: u64,

    /// Base unit for exponential backoff in milliseconds.
    pub base_delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            timeout_ms: 15_000,
            base_delay_ms: 200,
        }
    }
}

/// Block transaction pagination configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PaginationConfig {
    /// Politeness delay between consecutive page requests in milliseconds.
    pub page_delay_ms: u64,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self { page_delay_ms: 50 }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log filter directive (trace, debug, info, warn, error or a full EnvFilter string).
    pub log_level: String,

    /// Log output format.
    pub log_format: LogFormat,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
        }
    }
}
