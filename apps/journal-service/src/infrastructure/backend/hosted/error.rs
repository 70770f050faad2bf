//! Hosted-backend error types.

use thiserror::Error;

use crate::application::ports::{DirectoryError, IdentityError};

/// PostgreSQL `unique_violation`, surfaced by the table API on 409.
const UNIQUE_VIOLATION: &str = "23505";

/// Errors from the hosted backend adapters.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BackendError {
    /// Adapter could not be constructed.
    #[error("Invalid backend configuration: {0}")]
    Configuration(String),

    /// 401 or 403.
    #[error("Unauthorized: {message}")]
    Unauthorized {
        /// Error message from the API.
        message: String,
    },

    /// 404.
    #[error("Not found: {message}")]
    NotFound {
        /// Error message from the API.
        message: String,
    },

    /// 409, typically a database constraint violation.
    #[error("Conflict: {code} - {message}")]
    Conflict {
        /// Error code from the API (SQLSTATE for table calls).
        code: String,
        /// Error message from the API.
        message: String,
        /// Additional detail, when sent.
        details: Option<String>,
    },

    /// 400 or 422: the backend refused the request.
    #[error("Rejected: {code} - {message}")]
    Rejected {
        /// Error code from the API, or the HTTP status.
        code: String,
        /// Error message from the API.
        message: String,
    },

    /// Network failure, timeout, 408, 429 or 5xx.
    #[error("Backend unavailable: {0}")]
    Unavailable(String),

    /// Response body did not match the expected shape.
    #[error("JSON parsing error: {0}")]
    Decode(String),
}

impl BackendError {
    /// Name of the violated constraint, for `Conflict` errors.
    ///
    /// Taken from `unique constraint "<name>"` in the message, falling back to
    /// the details text.
    #[must_use]
    pub fn constraint_name(&self) -> Option<String> {
        let Self::Conflict {
            message, details, ..
        } = self
        else {
            return None;
        };

        quoted_constraint(message)
            .or_else(|| details.as_deref().and_then(quoted_constraint))
            .or_else(|| details.clone())
            .or_else(|| Some(message.clone()))
    }
}

fn quoted_constraint(text: &str) -> Option<String> {
    let (_, rest) = text.split_once("constraint \"")?;
    let (name, _) = rest.split_once('"')?;
    Some(name.to_string())
}

impl From<BackendError> for IdentityError {
    fn from(err: BackendError) -> Self {
        match err {
            BackendError::Rejected { message, .. } | BackendError::Conflict { message, .. } => {
                Self::Rejected { message }
            }
            BackendError::Unauthorized { .. } => Self::InvalidCredentials,
            other @ (BackendError::Configuration(_)
            | BackendError::NotFound { .. }
            | BackendError::Unavailable(_)
            | BackendError::Decode(_)) => Self::TransientFailure {
                message: other.to_string(),
            },
        }
    }
}

impl From<BackendError> for DirectoryError {
    fn from(err: BackendError) -> Self {
        match err {
            BackendError::Conflict { ref code, .. } if code == UNIQUE_VIOLATION => {
                Self::DuplicateKey {
                    constraint: err.constraint_name().unwrap_or_default(),
                }
            }
            BackendError::Conflict { message, .. } | BackendError::Rejected { message, .. } => {
                Self::ValidationFailure { message }
            }
            other => Self::TransientFailure {
                message: other.to_string(),
            },
        }
    }
}
