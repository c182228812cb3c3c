//! Backend error types.

use thiserror::Error;

/// Errors returned by identity backend calls.
#[derive(Debug, Error)]
pub enum BackendError {
    /// Entity not found.
    #[error("no such {entity_type}: '{name}'")]
    NoSuchEntity {
        /// Type of entity (e.g., "user", "group").
        entity_type: &'static str,
        /// Entity name.
        name: String,
    },

    /// Entity already exists.
    #[error("{entity_type} '{name}' already exists")]
    AlreadyExists {
        /// Type of entity.
        entity_type: &'static str,
        /// Entity name.
        name: String,
    },

    /// The session is not authorized for the operation.
    #[error("access denied: {0}")]
    AccessDenied(String),

    /// The backend rejected the request as malformed.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Backend API error with an HTTP status.
    #[error("backend API error: {status} - {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error message from the backend.
        message: String,
    },

    /// Connection failure (timeout, DNS, refused).
    #[error("connection error: {0}")]
    Connection(String),
}

impl BackendError {
    /// Creates a not-found error.
    #[must_use]
    pub fn no_such_entity(entity_type: &'static str, name: impl Into<String>) -> Self {
        Self::NoSuchEntity {
            entity_type,
            name: name.into(),
        }
    }

    /// Creates an already-exists error.
    #[must_use]
    pub fn already_exists(entity_type: &'static str, name: impl Into<String>) -> Self {
        Self::AlreadyExists {
            entity_type,
            name: name.into(),
        }
    }

    /// Checks if this is a not-found error.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NoSuchEntity { .. })
    }

    /// Checks if this is an already-exists error.
    #[must_use]
    pub const fn is_already_exists(&self) -> bool {
        matches!(self, Self::AlreadyExists { .. })
    }
}

impl From<reqwest::Error> for BackendError {
    fn from(err: reqwest::Error) -> Self {
        Self::Connection(err.to_string())
    }
}

/// Result type for backend operations.
pub type BackendResult<T> = Result<T, BackendError>;
