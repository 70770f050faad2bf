//! User-facing error taxonomy for the journal workflows.
//!
//! Every workflow failure is converted at the workflow boundary into a single
//! [`JournalError`] whose message is the one banner shown to the user. Backend
//! details travel in the error's context for logging and are never part of
//! the HTTP body.
//!
//! # Kinds and HTTP status
//!
//! | Kind | HTTP | Usage |
//! |------|------|-------|
//! | `VALIDATION_FAILURE` | 400 | Form input rejected before or by the provider |
//! | `CONFLICT` | 409 | Username or e-mail already taken |
//! | `INVALID_CREDENTIALS` | 401 | Unknown username or wrong password (one message) |
//! | `UNAUTHENTICATED` | 401 | No valid session |
//! | `NOT_FOUND` | 404 | Session without a profile |
//! | `TRANSIENT_FAILURE` | 500/503 | Backend unavailable or write failed |
//! | `PARTIAL_FAILURE` | 200 | Notice attached to an otherwise successful result |

use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure categories surfaced by the workflows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    /// Input rejected.
    ValidationFailure,
    /// Uniqueness conflict with an existing user.
    Conflict,
    /// Login refused.
    InvalidCredentials,
    /// No active session.
    Unauthenticated,
    /// Expected record missing.
    NotFound,
    /// Backend failure; the user may retry.
    TransientFailure,
    /// Result returned with a missing part.
    PartialFailure,
}

/// Error codes for the journal workflows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Validation errors
    /// Password and confirmation differ.
    PasswordMismatch,
    /// A required registration field is blank.
    MissingField,
    /// E-mail is malformed.
    InvalidEmail,
    /// Initial balance is not a number.
    InvalidAmount,
    /// Account name is blank.
    InvalidAccountName,
    /// Provider refused the sign-up; message is the provider's.
    IdentityRejected,

    // Conflicts
    /// Username already belongs to a profile.
    UsernameTaken,
    /// E-mail already belongs to a profile or identity.
    EmailTaken,

    // Authentication
    /// Unknown username or wrong password.
    InvalidCredentials,
    /// Missing, invalid or expired session.
    Unauthenticated,

    // Loading
    /// Session user has no profile.
    ProfileLoadError,
    /// Accounts could not be listed; profile still shown.
    AccountsLoadError,

    // Writes
    /// Identity created but profile insert failed.
    ProfileCreationFailed,
    /// Account insert failed.
    AccountCreationFailed,

    /// Backend unavailable.
    TransientFailure,
}

impl ErrorCode {
    /// Failure category of this code.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::PasswordMismatch
            | Self::MissingField
            | Self::InvalidEmail
            | Self::InvalidAmount
            | Self::InvalidAccountName
            | Self::IdentityRejected => ErrorKind::ValidationFailure,

            Self::UsernameTaken | Self::EmailTaken => ErrorKind::Conflict,

            Self::InvalidCredentials => ErrorKind::InvalidCredentials,
            Self::Unauthenticated => ErrorKind::Unauthenticated,

            Self::ProfileLoadError => ErrorKind::NotFound,
            Self::AccountsLoadError => ErrorKind::PartialFailure,

            Self::ProfileCreationFailed | Self::AccountCreationFailed | Self::TransientFailure => {
                ErrorKind::TransientFailure
            }
        }
    }

    /// HTTP status for a request failing with this code.
    #[must_use]
    pub const fn http_status(&self) -> StatusCode {
        match self {
            Self::PasswordMismatch
            | Self::MissingField
            | Self::InvalidEmail
            | Self::InvalidAmount
            | Self::InvalidAccountName
            | Self::IdentityRejected => StatusCode::BAD_REQUEST,
            Self::UsernameTaken | Self::EmailTaken => StatusCode::CONFLICT,
            Self::InvalidCredentials | Self::Unauthenticated => StatusCode::UNAUTHORIZED,
            Self::ProfileLoadError => StatusCode::NOT_FOUND,
            Self::AccountsLoadError => StatusCode::OK,
            Self::ProfileCreationFailed | Self::AccountCreationFailed => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Self::TransientFailure => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    /// Stable reason string, also used as the metrics outcome label.
    #[must_use]
    pub const fn reason(&self) -> &'static str {
        match self {
            Self::PasswordMismatch => "PASSWORD_MISMATCH",
            Self::MissingField => "MISSING_FIELD",
            Self::InvalidEmail => "INVALID_EMAIL",
            Self::InvalidAmount => "INVALID_AMOUNT",
            Self::InvalidAccountName => "INVALID_ACCOUNT_NAME",
            Self::IdentityRejected => "IDENTITY_REJECTED",
            Self::UsernameTaken => "USERNAME_TAKEN",
            Self::EmailTaken => "EMAIL_TAKEN",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::Unauthenticated => "UNAUTHENTICATED",
            Self::ProfileLoadError => "PROFILE_LOAD_ERROR",
            Self::AccountsLoadError => "ACCOUNTS_LOAD_ERROR",
            Self::ProfileCreationFailed => "PROFILE_CREATION_FAILED",
            Self::AccountCreationFailed => "ACCOUNT_CREATION_FAILED",
            Self::TransientFailure => "TRANSIENT_FAILURE",
        }
    }

    /// Default banner text for this code.
    #[must_use]
    pub const fn user_message(&self) -> &'static str {
        match self {
            Self::PasswordMismatch => "Passwords do not match",
            Self::MissingField => "All fields are required",
            Self::InvalidEmail => "Invalid email address",
            Self::InvalidAmount => "Initial balance must be a number",
            Self::InvalidAccountName => "Account name is required",
            Self::IdentityRejected => "An error occurred during registration",
            Self::UsernameTaken => "Username already exists",
            Self::EmailTaken => "Email already exists",
            Self::InvalidCredentials => "Invalid username or password",
            Self::Unauthenticated => "Please log in to continue",
            Self::ProfileLoadError => "Error loading profile",
            Self::AccountsLoadError => "Error loading trading accounts",
            Self::ProfileCreationFailed => "Error creating profile",
            Self::AccountCreationFailed => "Error creating trading account",
            Self::TransientFailure => "An error occurred",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.reason())
    }
}

/// A workflow failure: one user-visible banner plus logging context.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub struct JournalError {
    /// Error code.
    code: ErrorCode,
    /// Banner text shown to the user.
    message: String,
    /// Additional context (key-value pairs), logged only.
    context: Vec<(String, String)>,
}

impl JournalError {
    /// Create an error carrying the code's default banner.
    #[must_use]
    pub fn new(code: ErrorCode) -> Self {
        Self::with_message(code, code.user_message())
    }

    /// Create an error with a specific banner.
    #[must_use]
    pub fn with_message(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            context: Vec::new(),
        }
    }

    /// Add context to the error.
    #[must_use]
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.push((key.into(), value.into()));
        self
    }

    /// Get the error code.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        self.code
    }

    /// Get the failure category.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        self.code.kind()
    }

    /// Get the banner text.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the context.
    #[must_use]
    pub fn context(&self) -> &[(String, String)] {
        &self.context
    }

    /// Look up a context value by key.
    #[must_use]
    pub fn context_value(&self, key: &str) -> Option<&str> {
        self.context
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Convert to the HTTP error body. Context is not included.
    #[must_use]
    pub fn to_http_response(&self) -> HttpErrorResponse {
        HttpErrorResponse {
            code: self.code.reason().to_string(),
            kind: self.code.kind(),
            message: self.message.clone(),
        }
    }
}

impl std::fmt::Display for JournalError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code.reason(), self.message)
    }
}

/// HTTP error response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpErrorResponse {
    /// Error code string.
    pub code: String,
    /// Failure category.
    pub kind: ErrorKind,
    /// Banner text.
    pub message: String,
}

/// Convenience constructors for common errors.
impl JournalError {
    /// No valid session.
    #[must_use]
    pub fn unauthenticated() -> Self {
        Self::new(ErrorCode::Unauthenticated)
    }

    /// Login refused. Same banner for unknown user and wrong password.
    #[must_use]
    pub fn invalid_credentials() -> Self {
        Self::new(ErrorCode::InvalidCredentials)
    }

    /// Backend failure with a workflow-specific banner.
    #[must_use]
    pub fn transient(message: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::TransientFailure, message)
    }

    /// Provider refused the sign-up; its message is shown verbatim.
    #[must_use]
    pub fn identity_rejected(provider_message: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::IdentityRejected, provider_message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(ErrorCode::PasswordMismatch, ErrorKind::ValidationFailure, 400 ; "password mismatch")]
    #[test_case(ErrorCode::UsernameTaken, ErrorKind::Conflict, 409 ; "username taken")]
    #[test_case(ErrorCode::EmailTaken, ErrorKind::Conflict, 409 ; "email taken")]
    #[test_case(ErrorCode::InvalidCredentials, ErrorKind::InvalidCredentials, 401 ; "invalid credentials")]
    #[test_case(ErrorCode::Unauthenticated, ErrorKind::Unauthenticated, 401 ; "unauthenticated")]
    #[test_case(ErrorCode::ProfileLoadError, ErrorKind::NotFound, 404 ; "profile load")]
    #[test_case(ErrorCode::AccountsLoadError, ErrorKind::PartialFailure, 200 ; "accounts load")]
    #[test_case(ErrorCode::ProfileCreationFailed, ErrorKind::TransientFailure, 500 ; "profile creation")]
    #[test_case(ErrorCode::TransientFailure, ErrorKind::TransientFailure, 503 ; "transient")]
    fn code_mapping(code: ErrorCode, kind: ErrorKind, status: u16) {
        assert_eq!(code.kind(), kind);
        assert_eq!(code.http_status().as_u16(), status);
    }

    #[test]
    fn default_message_comes_from_code() {
        let error = JournalError::new(ErrorCode::UsernameTaken);
        assert_eq!(error.message(), "Username already exists");
        assert_eq!(error.to_string(), "[USERNAME_TAKEN] Username already exists");
    }

    #[test]
    fn context_is_not_serialized() {
        let error = JournalError::new(ErrorCode::ProfileCreationFailed)
            .with_context("user_id", "u-1")
            .with_context("backend_error", "duplicate key value violates unique constraint");

        assert_eq!(error.context().len(), 2);
        assert_eq!(error.context_value("user_id"), Some("u-1"));

        let body = serde_json::to_string(&error.to_http_response()).unwrap();
        assert!(!body.contains("u-1"));
        assert!(!body.contains("duplicate key"));
        assert!(body.contains("\"kind\":\"TRANSIENT_FAILURE\""));
        assert!(body.contains("\"code\":\"PROFILE_CREATION_FAILED\""));
    }

    #[test]
    fn identity_rejected_keeps_provider_text() {
        let error = JournalError::identity_rejected("Signups not allowed for this instance");
        assert_eq!(error.message(), "Signups not allowed for this instance");
        assert_eq!(error.kind(), ErrorKind::ValidationFailure);
    }

    #[test]
    fn transient_uses_given_banner() {
        let error = JournalError::transient("An error occurred during login");
        assert_eq!(error.code(), ErrorCode::TransientFailure);
        assert_eq!(error.message(), "An error occurred during login");
    }
}
