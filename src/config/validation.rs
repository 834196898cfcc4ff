//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check the base URL is usable and points at the configured network
//! - Validate value ranges (attempts > 0, timeouts > 0)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ClientConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is handed to any component

use thiserror::Error;
use tracing_subscriber::EnvFilter;
use url::Url;

use crate::config::schema::{ClientConfig, Network};

/// A single semantic problem found in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("api.base_url must not be empty")]
    EmptyBaseUrl,

    #[error("api.base_url `{url}` is not a valid URL: {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("api.base_url scheme `{0}` is not http or https")]
    UnsupportedScheme(String),

    #[error("api.base_url `{url}` does not point at the {network} API")]
    NetworkMismatch { url: String, network: Network },

    #[error("retries.max_attempts must be at least 1")]
    ZeroAttempts,

    #[error("retries.timeout_ms must be greater than 0")]
    ZeroTimeout,

    #[error("observability.log_level `{0}` is not a valid filter")]
    InvalidLogLevel(String),
}

const TEST_NETWORK_SEGMENTS: [&str; 3] = ["testnet", "testnet4", "signet"];

/// Validate a loaded configuration.
pub fn validate_config(config: &ClientConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if let Err(err) = validate_base_url(&config.api.base_url, config.api.network) {
        errors.push(err);
    }

    if config.retries.max_attempts == 0 {
        errors.push(ValidationError::ZeroAttempts);
    }
    if config.retries.timeout_ms == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }

    if EnvFilter::try_new(&config.observability.log_level).is_err() {
        errors.push(ValidationError::InvalidLogLevel(
            config.observability.log_level.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_base_url(raw: &str, network: Network) -> Result<(), ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyBaseUrl);
    }

    let url = Url::parse(trimmed).map_err(|e| ValidationError::InvalidBaseUrl {
        url: trimmed.to_string(),
        reason: e.to_string(),
    })?;

    match url.scheme() {
        "http" | "https" => {}
        other => return Err(ValidationError::UnsupportedScheme(other.to_string())),
    }

    let segments: Vec<&str> = url
        .path_segments()
        .map(|s| s.filter(|seg| !seg.is_empty()).collect())
        .unwrap_or_default();

    let matches = match network.path_segment() {
        Some(expected) => segments.contains(&expected),
        None => !segments
            .iter()
            .any(|seg| TEST_NETWORK_SEGMENTS.contains(seg)),
    };

    if matches {
        Ok(())
    } else {
        Err(ValidationError::NetworkMismatch {
            url: trimmed.to_string(),
            network,
        })
    }
}
