//! Login User Use Case
//!
//! Resolves a username to its profile's e-mail, then authenticates with the
//! provider. An unknown username and a wrong password produce the same
//! error and message, so the response does not reveal which usernames exist.

use std::sync::Arc;
use std::time::Instant;

use super::observe;
use crate::application::dto::LoginUserDto;
use crate::application::ports::{
    Credentials, DirectoryStorePort, IdentityError, IdentityGatewayPort, Session,
};
use crate::domain::identity::Username;
use crate::error::JournalError;

const WORKFLOW: &str = "login";
const GENERIC_FAILURE: &str = "An error occurred during login";

/// Use case for logging in by username.
pub struct LoginUserUseCase<I, D>
where
    I: IdentityGatewayPort,
    D: DirectoryStorePort,
{
    identity: Arc<I>,
    directory: Arc<D>,
}

impl<I, D> LoginUserUseCase<I, D>
where
    I: IdentityGatewayPort,
    D: DirectoryStorePort,
{
    /// Create a new LoginUserUseCase.
    pub const fn new(identity: Arc<I>, directory: Arc<D>) -> Self {
        Self {
            identity,
            directory,
        }
    }

    /// Execute the use case.
    pub async fn execute(&self, request: &LoginUserDto) -> Result<Session, JournalError> {
        let started = Instant::now();
        let result = self.login(request).await;
        observe(WORKFLOW, started, &result);
        result
    }

    async fn login(&self, request: &LoginUserDto) -> Result<Session, JournalError> {
        let username = match Username::parse(&request.username) {
            Ok(username) if !request.password.is_empty() => username,
            _ => {
                return Err(JournalError::invalid_credentials().with_context("reason", "blank input"));
            }
        };

        let profile = match self.directory.find_profile_by_username(&username).await {
            Ok(Some(profile)) => profile,
            Ok(None) => {
                return Err(
                    JournalError::invalid_credentials().with_context("reason", "unknown username")
                );
            }
            Err(e) => {
                return Err(JournalError::transient(GENERIC_FAILURE)
                    .with_context("step", "find_profile_by_username")
                    .with_context("backend_error", e.to_string()));
            }
        };

        let credentials = Credentials::new(profile.email, request.password.as_str());
        match self.identity.authenticate(&credentials).await {
            Ok(session) => {
                tracing::info!(user_id = %session.user_id, username = %username, "User logged in");
                Ok(session)
            }
            Err(IdentityError::TransientFailure { message }) => {
                Err(JournalError::transient(GENERIC_FAILURE)
                    .with_context("step", "authenticate")
                    .with_context("backend_error", message))
            }
            Err(e) => Err(JournalError::invalid_credentials()
                .with_context("reason", "authentication refused")
                .with_context("backend_error", e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{DirectoryError, MockDirectoryStorePort, MockIdentityGatewayPort};
    use crate::application::use_cases::fixtures;
    use crate::error::{ErrorCode, ErrorKind, HttpErrorResponse};
    use proptest::prelude::*;

    fn login(username: &str, password: &str) -> LoginUserDto {
        LoginUserDto {
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    /// Directory knows only "jane"; the provider accepts only "p1".
    fn jane_only() -> LoginUserUseCase<MockIdentityGatewayPort, MockDirectoryStorePort> {
        let mut directory = MockDirectoryStorePort::new();
        directory
            .expect_find_profile_by_username()
            .returning(|u| {
                Ok((u.as_str() == "jane").then(|| fixtures::profile("u-jane", "jane", "jane@x.com")))
            });
        let mut identity = MockIdentityGatewayPort::new();
        identity.expect_authenticate().returning(|c| {
            if c.email.as_str() == "jane@x.com" && c.password() == "p1" {
                Ok(fixtures::session("u-jane", "jane@x.com"))
            } else {
                Err(IdentityError::InvalidCredentials)
            }
        });
        LoginUserUseCase::new(Arc::new(identity), Arc::new(directory))
    }

    #[tokio::test]
    async fn logs_in_with_profile_email() {
        let session = jane_only().execute(&login("jane", "p1")).await.unwrap();
        assert_eq!(session.user_id.as_str(), "u-jane");
        assert_eq!(session.email.as_str(), "jane@x.com");
    }

    #[tokio::test]
    async fn wrong_password_and_unknown_user_are_indistinguishable() {
        let uc = jane_only();
        let wrong_password = uc.execute(&login("jane", "wrong")).await.unwrap_err();
        let unknown_user = uc.execute(&login("nonexistent", "p1")).await.unwrap_err();

        assert_eq!(wrong_password.code(), ErrorCode::InvalidCredentials);
        assert_eq!(wrong_password.message(), "Invalid username or password");
        assert_eq!(
            wrong_password.to_http_response(),
            unknown_user.to_http_response()
        );
    }

    #[tokio::test]
    async fn blank_input_does_not_touch_the_store() {
        let uc = LoginUserUseCase::new(
            Arc::new(MockIdentityGatewayPort::new()),
            Arc::new(MockDirectoryStorePort::new()),
        );

        let blank_user = uc.execute(&login("   ", "p1")).await.unwrap_err();
        let blank_password = uc.execute(&login("jane", "")).await.unwrap_err();

        assert_eq!(blank_user.code(), ErrorCode::InvalidCredentials);
        assert_eq!(blank_password.code(), ErrorCode::InvalidCredentials);
    }

    #[tokio::test]
    async fn ambiguous_username_is_transient() {
        let mut directory = MockDirectoryStorePort::new();
        directory.expect_find_profile_by_username().returning(|_| {
            Err(DirectoryError::AmbiguousMatch {
                entity: "profile".to_string(),
                key: "jane".to_string(),
                rows: 2,
            })
        });
        let uc = LoginUserUseCase::new(Arc::new(MockIdentityGatewayPort::new()), Arc::new(directory));

        let err = uc.execute(&login("jane", "p1")).await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::TransientFailure);
        assert_eq!(err.message(), "An error occurred during login");
    }

    #[tokio::test]
    async fn provider_outage_is_transient() {
        let mut directory = MockDirectoryStorePort::new();
        directory
            .expect_find_profile_by_username()
            .returning(|_| Ok(Some(fixtures::profile("u-jane", "jane", "jane@x.com"))));
        let mut identity = MockIdentityGatewayPort::new();
        identity.expect_authenticate().returning(|_| {
            Err(IdentityError::TransientFailure {
                message: "503 Service Unavailable".to_string(),
            })
        });
        let uc = LoginUserUseCase::new(Arc::new(identity), Arc::new(directory));

        let err = uc.execute(&login("jane", "p1")).await.unwrap_err();

        assert_eq!(err.code(), ErrorCode::TransientFailure);
        assert!(!err.message().contains("503"));
    }

    proptest! {
        #[test]
        fn any_failed_login_yields_the_same_body(
            username in "[a-z]{1,12}",
            password in "[a-zA-Z0-9]{1,12}",
        ) {
            prop_assume!(!(username == "jane" && password == "p1"));
            let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
            let err = runtime
                .block_on(jane_only().execute(&login(&username, &password)))
                .unwrap_err();
            prop_assert_eq!(
                err.to_http_response(),
                HttpErrorResponse {
                    code: "INVALID_CREDENTIALS".to_string(),
                    kind: ErrorKind::InvalidCredentials,
                    message: "Invalid username or password".to_string(),
                }
            );
        }
    }
}
