//! Configuration loading from disk and the process environment.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::ClientConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Environment variable that replaces `api.base_url`.
pub const BASE_URL_ENV: &str = "EXPLORER_API_BASE_URL";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Parse a TOML document into a configuration without validating it.
pub fn parse_config(content: &str) -> Result<ClientConfig, ConfigError> {
    Ok(toml::from_str(content)?)
}

/// Read the configuration file if one is given, otherwise start from defaults.
pub fn read_config(path: Option<&Path>) -> Result<ClientConfig, ConfigError> {
    match path {
        Some(path) => {
            let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
                path: path.display().to_string(),
                source,
            })?;
            parse_config(&content)
        }
        None => Ok(ClientConfig::default()),
    }
}

/// Apply environment overrides using `lookup` to resolve variables.
pub fn apply_env_overrides<F>(config: &mut ClientConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(base_url) = lookup(BASE_URL_ENV) {
        let trimmed = base_url.trim();
        if !trimmed.is_empty() {
            config.api.base_url = trimmed.to_string();
        }
    }
}

/// Load configuration from an optional TOML file, apply process environment
/// overrides and an optional explicit base URL, then validate the result.
pub fn load_config(
    path: Option<&Path>,
    base_url_override: Option<&str>,
) -> Result<ClientConfig, ConfigError> {
    let mut config = read_config(path)?;
    apply_env_overrides(&mut config, |key| std::env::var(key).ok());

    if let Some(base_url) = base_url_override {
        config.api.base_url = base_url.trim().to_string();
    }

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}
