//! HTTP response DTOs.

use axum::Json;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use crate::application::dto::{ProfileView, RegistrationOutcome};
use crate::application::ports::Session;
use crate::domain::identity::Profile;
use crate::domain::shared::Timestamp;
use crate::domain::trading_account::{AccountList, TradingAccount};
use crate::error::{HttpErrorResponse, JournalError};

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Service version.
    pub version: String,
}

/// Session as returned to the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionResponse {
    /// Bearer token for subsequent requests.
    pub access_token: String,
    /// Refresh token, when issued.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    /// Expiry of `access_token`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<Timestamp>,
    /// User id.
    pub user_id: String,
    /// E-mail on the identity.
    pub email: String,
}

impl From<Session> for SessionResponse {
    fn from(session: Session) -> Self {
        Self {
            access_token: session.access_token.expose().to_string(),
            refresh_token: session
                .refresh_token
                .map(|token| token.expose().to_string()),
            expires_at: session.expires_at,
            user_id: session.user_id.into_inner(),
            email: session.email.as_str().to_string(),
        }
    }
}

/// Response from registration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterResponse {
    /// The stored profile.
    pub profile: Profile,
    /// Session, unless e-mail confirmation is pending.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session: Option<SessionResponse>,
}

impl From<RegistrationOutcome> for RegisterResponse {
    fn from(outcome: RegistrationOutcome) -> Self {
        Self {
            profile: outcome.profile,
            session: outcome.session.map(SessionResponse::from),
        }
    }
}

/// Response from login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    /// The new session.
    pub session: SessionResponse,
}

/// Response from the profile endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileResponse {
    /// Profile, with the identity's e-mail.
    pub profile: Profile,
    /// Accounts, newest first.
    pub accounts: AccountList,
    /// Present when part of the view failed to load.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<HttpErrorResponse>,
}

impl From<ProfileView> for ProfileResponse {
    fn from(view: ProfileView) -> Self {
        Self {
            notice: view.notice.as_ref().map(JournalError::to_http_response),
            profile: view.profile,
            accounts: view.accounts,
        }
    }
}

/// Response from account creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountResponse {
    /// The stored account.
    pub account: TradingAccount,
}

impl IntoResponse for JournalError {
    fn into_response(self) -> Response {
        (self.code().http_status(), Json(self.to_http_response())).into_response()
    }
}
