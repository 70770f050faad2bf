//! Hosted identity gateway implementing IdentityGatewayPort.

use async_trait::async_trait;

use crate::application::ports::{
    AccessToken, Credentials, IdentityError, IdentityGatewayPort, IdentityHandle, Session,
};

use super::api_types::{
    AuthSessionResponse, AuthUserResponse, PasswordCredentialsRequest, SignUpResponse,
};
use super::config::HostedBackendConfig;
use super::error::BackendError;
use super::http_client::{BackendHttpClient, BackendRequest};

const SIGN_UP_PATH: &str = "/auth/v1/signup";
const TOKEN_PATH: &str = "/auth/v1/token";
const USER_PATH: &str = "/auth/v1/user";
const LOGOUT_PATH: &str = "/auth/v1/logout";

/// Auth error codes meaning the e-mail is already taken.
const ALREADY_REGISTERED_CODES: &[&str] = &["user_already_exists", "email_exists"];

/// Auth error codes meaning the e-mail or password format was refused.
const INVALID_FORMAT_CODES: &[&str] = &["weak_password", "validation_failed", "email_address_invalid"];

/// Identity gateway backed by the hosted auth API.
///
/// Stateless: every session-scoped call carries the caller's access token.
#[derive(Debug, Clone)]
pub struct HostedIdentityGateway {
    client: BackendHttpClient,
}

impl HostedIdentityGateway {
    /// Create a new gateway.
    pub fn new(config: &HostedBackendConfig) -> Result<Self, BackendError> {
        Ok(Self {
            client: BackendHttpClient::new(config)?,
        })
    }

    fn sign_up_error(err: BackendError) -> IdentityError {
        match err {
            BackendError::Rejected { code, message } | BackendError::Conflict { code, message, .. } => {
                if ALREADY_REGISTERED_CODES.contains(&code.as_str())
                    || message.contains("already registered")
                {
                    IdentityError::AlreadyRegistered
                } else if INVALID_FORMAT_CODES.contains(&code.as_str()) {
                    IdentityError::InvalidCredentialsFormat { message }
                } else {
                    IdentityError::Rejected { message }
                }
            }
            // Sign-up is called with the API key; a 401/403 is a backend fault
            BackendError::Unauthorized { message } => IdentityError::TransientFailure { message },
            other => other.into(),
        }
    }
}

#[async_trait]
impl IdentityGatewayPort for HostedIdentityGateway {
    async fn create_identity(
        &self,
        credentials: &Credentials,
    ) -> Result<IdentityHandle, IdentityError> {
        let body = PasswordCredentialsRequest {
            email: credentials.email.as_str(),
            password: credentials.password(),
        };

        let response: SignUpResponse = self
            .client
            .send("sign_up", BackendRequest::post(SIGN_UP_PATH, &body))
            .await
            .map_err(Self::sign_up_error)?;

        match response {
            SignUpResponse::Session(session) => {
                let session = session.into_session()?;
                Ok(IdentityHandle {
                    user_id: session.user_id.clone(),
                    email: session.email.clone(),
                    session: Some(session),
                })
            }
            SignUpResponse::User(user) => {
                let (user_id, email) = user.into_identity()?;
                tracing::info!(user_id = %user_id, "Identity created, e-mail confirmation pending");
                Ok(IdentityHandle {
                    user_id,
                    email,
                    session: None,
                })
            }
        }
    }

    async fn authenticate(&self, credentials: &Credentials) -> Result<Session, IdentityError> {
        let body = PasswordCredentialsRequest {
            email: credentials.email.as_str(),
            password: credentials.password(),
        };

        let response: AuthSessionResponse = self
            .client
            .send(
                "sign_in",
                BackendRequest::post(TOKEN_PATH, &body).query(&[("grant_type", "password")]),
            )
            .await
            .map_err(|err| match err {
                BackendError::Rejected { .. } | BackendError::Unauthorized { .. } => {
                    IdentityError::InvalidCredentials
                }
                other => other.into(),
            })?;

        Ok(response.into_session()?)
    }

    async fn current_session(&self, token: &AccessToken) -> Result<Option<Session>, IdentityError> {
        let result: Result<AuthUserResponse, BackendError> = self
            .client
            .send("get_user", BackendRequest::get(USER_PATH).bearer(token))
            .await;

        match result {
            Ok(user) => {
                let (user_id, email) = user.into_identity()?;
                Ok(Some(Session {
                    access_token: token.clone(),
                    refresh_token: None,
                    expires_at: None,
                    user_id,
                    email,
                }))
            }
            Err(BackendError::Unauthorized { .. }) => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    async fn end_session(&self, token: &AccessToken) -> Result<(), IdentityError> {
        let result: Result<serde_json::Value, BackendError> = self
            .client
            .send(
                "sign_out",
                BackendRequest::post(LOGOUT_PATH, &serde_json::Value::Null).bearer(token),
            )
            .await;

        match result {
            Ok(_) | Err(BackendError::Unauthorized { .. } | BackendError::NotFound { .. }) => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rejected(code: &str, message: &str) -> BackendError {
        BackendError::Rejected {
            code: code.to_string(),
            message: message.to_string(),
        }
    }

    #[test]
    fn sign_up_already_registered_by_code() {
        assert_eq!(
            HostedIdentityGateway::sign_up_error(rejected("user_already_exists", "taken")),
            IdentityError::AlreadyRegistered
        );
    }

    #[test]
    fn sign_up_already_registered_by_message() {
        assert_eq!(
            HostedIdentityGateway::sign_up_error(rejected("400", "User already registered")),
            IdentityError::AlreadyRegistered
        );
    }

    #[test]
    fn sign_up_weak_password() {
        assert_eq!(
            HostedIdentityGateway::sign_up_error(rejected(
                "weak_password",
                "Password should be at least 6 characters"
            )),
            IdentityError::InvalidCredentialsFormat {
                message: "Password should be at least 6 characters".to_string()
            }
        );
    }

    #[test]
    fn sign_up_other_refusal_is_verbatim() {
        assert_eq!(
            HostedIdentityGateway::sign_up_error(rejected(
                "signup_disabled",
                "Signups not allowed for this instance"
            )),
            IdentityError::Rejected {
                message: "Signups not allowed for this instance".to_string()
            }
        );
    }

    #[test]
    fn sign_up_outage_is_transient() {
        assert!(matches!(
            HostedIdentityGateway::sign_up_error(BackendError::Unavailable("502".to_string())),
            IdentityError::TransientFailure { .. }
        ));
    }
}
