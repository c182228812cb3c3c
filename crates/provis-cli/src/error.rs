//! CLI error types.

use thiserror::Error;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// Validation error in a batch document.
    #[error("validation error: {0}")]
    Validation(String),

    /// Backend error.
    #[error(transparent)]
    Backend(#[from] provis_backend::BackendError),

    /// Provisioning error (setup failures included).
    #[error(transparent)]
    Provisioning(#[from] provis_core::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid argument.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;
