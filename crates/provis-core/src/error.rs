//! Error handling for provis.
//!
//! Two classes of failure flow through the workspace: fatal setup
//! failures that abort a run before any entity is processed, and
//! per-entity failures that are captured in a result and never stop
//! batch processing. [`Error::is_fatal`] is that boundary.

use thiserror::Error;

/// Result type alias using the provis error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for provisioning operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Setup failure (bad credentials, unreachable backend).
    ///
    /// Fatal: aborts the run before any entity is processed.
    #[error("setup failed: {0}")]
    Setup(String),

    /// Configuration error (missing or malformed configuration).
    ///
    /// Fatal: the run cannot start without a usable configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// Validation error for a single entity.
    #[error("validation error: {0}")]
    Validation(String),

    /// Backend call failure for a single entity.
    #[error("backend error: {0}")]
    Backend(String),

    /// Resource not found.
    #[error("resource not found: {0}")]
    NotFound(String),

    /// Resource already exists.
    #[error("resource already exists: {0}")]
    AlreadyExists(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Returns whether this error aborts the whole run.
    ///
    /// Only setup-time conditions are fatal; everything else is scoped
    /// to a single entity and captured in that entity's result.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::Setup(_) | Self::Config(_))
    }

    /// Returns whether this error is scoped to a single entity.
    #[must_use]
    pub const fn is_entity_error(&self) -> bool {
        matches!(
            self,
            Self::Validation(_) | Self::Backend(_) | Self::NotFound(_) | Self::AlreadyExists(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn setup_errors_are_fatal() {
        let error = Error::Setup("invalid credentials".to_string());
        assert!(error.is_fatal());
        assert!(!error.is_entity_error());
    }

    #[test]
    fn validation_errors_are_entity_scoped() {
        let error = Error::Validation("username is required".to_string());
        assert!(error.is_entity_error());
        assert!(!error.is_fatal());
    }

    #[test]
    fn conflict_errors_are_entity_scoped() {
        let error = Error::AlreadyExists("user alice".to_string());
        assert!(error.is_entity_error());
        assert!(!error.is_fatal());
        assert_eq!(error.to_string(), "resource already exists: user alice");
    }
}
