//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize, apply EXPLORER_API_BASE_URL)
//!     → CLI --base-url override
//!     → validation.rs (semantic checks)
//!     → ClientConfig (validated, immutable)
//!     → values handed to each component at construction
//! ```
//!
//! # Design Decisions
//! - Config is read once at startup; no component reads the environment
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks
//! - Any validation error is fatal

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{
    ApiConfig, ClientConfig, LogFormat, Network, ObservabilityConfig, PaginationConfig,
    RetryConfig,
};
pub use validation::{validate_config, ValidationError};
