//! Hosted backend request and response types.
//!
//! Auth types follow the GoTrue REST format. Table rows deserialize straight
//! into the domain records, so only auth payloads and error bodies live here.

use serde::{Deserialize, Serialize};

use super::error::BackendError;
use crate::application::ports::{AccessToken, Session};
use crate::domain::identity::EmailAddress;
use crate::domain::shared::{Timestamp, UserId};

// ============================================================================
// Auth Request Types
// ============================================================================

/// Body of `POST /auth/v1/signup` and `POST /auth/v1/token?grant_type=password`.
#[derive(Serialize)]
pub struct PasswordCredentialsRequest<'a> {
    /// E-mail address.
    pub email: &'a str,
    /// Plaintext password.
    pub password: &'a str,
}

// ============================================================================
// Auth Response Types
// ============================================================================

/// User record returned by the auth API.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthUserResponse {
    /// User id; becomes the profile id.
    pub id: String,
    /// E-mail on the identity record.
    #[serde(default)]
    pub email: Option<String>,
}

impl AuthUserResponse {
    /// Convert into domain identifiers.
    pub fn into_identity(self) -> Result<(UserId, EmailAddress), BackendError> {
        let email = self
            .email
            .ok_or_else(|| BackendError::Decode("auth user has no email".to_string()))?;
        let email =
            EmailAddress::parse(&email).map_err(|e| BackendError::Decode(e.to_string()))?;
        Ok((UserId::new(self.id), email))
    }
}

/// Session returned by sign-in, and by sign-up when no confirmation is required.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthSessionResponse {
    /// Bearer token.
    pub access_token: String,
    /// Refresh token.
    #[serde(default)]
    pub refresh_token: Option<String>,
    /// Lifetime of `access_token` in seconds.
    #[serde(default)]
    pub expires_in: Option<i64>,
    /// Expiry of `access_token` as a Unix timestamp.
    #[serde(default)]
    pub expires_at: Option<i64>,
    /// The signed-in user.
    pub user: AuthUserResponse,
}

impl AuthSessionResponse {
    /// Convert into a domain session.
    pub fn into_session(self) -> Result<Session, BackendError> {
        let expires_at = self
            .expires_at
            .and_then(Timestamp::from_unix_seconds)
            .or_else(|| {
                self.expires_in.map(|secs| {
                    Timestamp::new(Timestamp::now().as_datetime() + chrono::Duration::seconds(secs))
                })
            });
        let (user_id, email) = self.user.into_identity()?;
        Ok(Session {
            access_token: AccessToken::new(self.access_token),
            refresh_token: self.refresh_token.map(AccessToken::new),
            expires_at,
            user_id,
            email,
        })
    }
}

/// Sign-up response: a session, or a bare user while e-mail confirmation is pending.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum SignUpResponse {
    /// Signed in immediately.
    Session(AuthSessionResponse),
    /// Confirmation pending.
    User(AuthUserResponse),
}

// ============================================================================
// Error Types
// ============================================================================

/// Error body returned by either API.
///
/// The auth API uses `error_code`/`msg` (older versions `error`/
/// `error_description`); the table API uses `code`/`message`/`details`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BackendErrorResponse {
    /// SQLSTATE or numeric HTTP code.
    #[serde(default)]
    pub code: Option<serde_json::Value>,
    /// Machine-readable auth error code.
    #[serde(default)]
    pub error_code: Option<String>,
    /// Auth error message.
    #[serde(default)]
    pub msg: Option<String>,
    /// Table error message.
    #[serde(default)]
    pub message: Option<String>,
    /// OAuth-style error code.
    #[serde(default)]
    pub error: Option<String>,
    /// OAuth-style error message.
    #[serde(default)]
    pub error_description: Option<String>,
    /// Table error details.
    #[serde(default)]
    pub details: Option<String>,
}

impl BackendErrorResponse {
    /// Most specific error code present.
    #[must_use]
    pub fn code(&self) -> Option<String> {
        self.error_code
            .clone()
            .or_else(|| match &self.code {
                Some(serde_json::Value::String(code)) => Some(code.clone()),
                _ => None,
            })
            .or_else(|| self.error.clone())
    }

    /// Most specific message present.
    #[must_use]
    pub fn message(&self) -> Option<String> {
        self.msg
            .clone()
            .or_else(|| self.message.clone())
            .or_else(|| self.error_description.clone())
            .or_else(|| self.error.clone())
    }
}
