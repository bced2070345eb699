//! Error types for configuration loading.
//!
//! Covers reading files, parsing YAML, missing resources and logging
//! bootstrap failures.

use thiserror::Error;

/// Errors that can occur while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing or serialization failure.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Installing the tracing subscriber failed.
    #[error("logging error: {0}")]
    Logging(String),

    /// A value read from configuration was rejected, or a required file
    /// is missing ([`CommonsError::NotFound`](odt_commons_core::CommonsError::NotFound)).
    #[error(transparent)]
    Commons(#[from] odt_commons_core::CommonsError),
}

/// Convenience alias for results with [`ConfigError`].
pub type Result<T> = std::result::Result<T, ConfigError>;
