//! CLI error types

use contagion_risk::{CascadeError, DatasetError};
use thiserror::Error;

use crate::config::ConfigError;

/// Errors surfaced by CLI commands
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration could not be loaded or failed validation
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Dataset file does not exist
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// Dataset file is not valid JSON for the four tables
    #[error("Invalid dataset JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Dataset rejected by the normaliser
    #[error("Dataset error: {0}")]
    Dataset(#[from] DatasetError),

    /// Cascade precondition violated
    #[error("Cascade error: {0}")]
    Cascade(#[from] CascadeError),

    /// Invalid command argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;
