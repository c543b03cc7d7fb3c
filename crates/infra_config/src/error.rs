//! Configuration error types.

use model_core::types::ModelError;
use thiserror::Error;

/// Errors from loading settings or catalog files.
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    /// File could not be read
    #[error("IO error: {0}")]
    Io(String),

    /// File is not valid TOML for the expected schema
    #[error("Parse error: {0}")]
    Parse(String),

    /// One or more settings are out of range
    #[error("Validation errors: {}", .0.join("; "))]
    Validation(Vec<String>),

    /// Catalog content was rejected by the model
    #[error("Catalog error: {0}")]
    Catalog(#[from] ModelError),
}
