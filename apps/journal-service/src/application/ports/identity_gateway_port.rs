//! Identity Gateway Port (Driven Port)
//!
//! Interface to the external authentication provider: sign-up, sign-in,
//! sign-out and "current user" lookup. Adapters hold no session state; the
//! caller presents its access token on every call.

use async_trait::async_trait;
use std::fmt;

use crate::domain::identity::EmailAddress;
use crate::domain::shared::{Timestamp, UserId};

/// E-mail and password pair sent to the provider.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// E-mail the identity is registered under.
    pub email: EmailAddress,
    password: String,
}

impl Credentials {
    /// Create credentials.
    #[must_use]
    pub fn new(email: EmailAddress, password: impl Into<String>) -> Self {
        Self {
            email,
            password: password.into(),
        }
    }

    /// The plaintext password, for the adapter building the provider request.
    #[must_use]
    pub fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Opaque bearer token identifying a session.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct AccessToken(String);

impl AccessToken {
    /// Wrap a token string.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// The raw token, for the `Authorization` header.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken([REDACTED])")
    }
}

/// An authenticated session issued by the provider.
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    /// Bearer token for subsequent calls.
    pub access_token: AccessToken,
    /// Refresh token, when the provider issues one.
    pub refresh_token: Option<AccessToken>,
    /// Expiry of `access_token`, when known.
    pub expires_at: Option<Timestamp>,
    /// Identity-provider user id.
    pub user_id: UserId,
    /// E-mail on the identity record.
    pub email: EmailAddress,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("user_id", &self.user_id)
            .field("email", &self.email)
            .field("expires_at", &self.expires_at)
            .finish_non_exhaustive()
    }
}

/// Result of creating an identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityHandle {
    /// Provider-issued user id; becomes the profile id.
    pub user_id: UserId,
    /// E-mail the identity was created with.
    pub email: EmailAddress,
    /// Session, unless the provider requires e-mail confirmation first.
    pub session: Option<Session>,
}

/// Identity gateway error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdentityError {
    /// An identity with this e-mail already exists.
    #[error("User already registered")]
    AlreadyRegistered,

    /// The provider refused the e-mail or password format.
    #[error("Invalid credentials format: {message}")]
    InvalidCredentialsFormat {
        /// Error details.
        message: String,
    },

    /// Unknown e-mail or wrong password.
    #[error("Invalid login credentials")]
    InvalidCredentials,

    /// Any other refusal by the provider.
    #[error("Rejected by identity provider: {message}")]
    Rejected {
        /// Provider message, verbatim.
        message: String,
    },

    /// Network or service failure. Not retried.
    #[error("Identity provider unavailable: {message}")]
    TransientFailure {
        /// Error details.
        message: String,
    },
}

impl IdentityError {
    /// Message suitable for showing to the user verbatim, if the provider sent one.
    #[must_use]
    pub fn provider_message(&self) -> Option<&str> {
        match self {
            Self::InvalidCredentialsFormat { message } | Self::Rejected { message } => {
                Some(message)
            }
            _ => None,
        }
    }
}

/// Port for the authentication provider.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityGatewayPort: Send + Sync {
    /// Create an identity. Returns a session unless confirmation is pending.
    async fn create_identity(
        &self,
        credentials: &Credentials,
    ) -> Result<IdentityHandle, IdentityError>;

    /// Sign in with e-mail and password.
    async fn authenticate(&self, credentials: &Credentials) -> Result<Session, IdentityError>;

    /// Resolve a token to its session. `None` if the token is unknown or expired.
    async fn current_session(&self, token: &AccessToken) -> Result<Option<Session>, IdentityError>;

    /// Sign out, invalidating the token.
    async fn end_session(&self, token: &AccessToken) -> Result<(), IdentityError>;
}
