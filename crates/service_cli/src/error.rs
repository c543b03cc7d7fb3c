//! CLI error types.

use infra_config::ConfigError;
use model_core::types::ModelError;
use thiserror::Error;

/// Errors surfaced by `whatif` commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// A file named on the command line does not exist
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// Argument value the command cannot use
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Settings or catalog could not be loaded
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Scenario rejected by the model
    #[error(transparent)]
    Model(#[from] ModelError),

    /// Writing output failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV encoding failed
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Result alias for CLI commands.
pub type Result<T> = std::result::Result<T, CliError>;
