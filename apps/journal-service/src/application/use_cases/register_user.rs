//! Register User Use Case
//!
//! Creates an identity and its profile. The two writes go to separate
//! services with no transaction between them; if the profile insert fails
//! the identity stays behind without a profile (an orphan identity). That gap
//! is reported and counted here, not compensated.

use std::sync::Arc;
use std::time::Instant;

use super::observe;
use crate::application::dto::{RegisterUserDto, RegistrationOutcome};
use crate::application::ports::{
    Credentials, DirectoryStorePort, IdentityError, IdentityGatewayPort,
};
use crate::domain::identity::{EmailAddress, NewProfile, Username};
use crate::error::{ErrorCode, JournalError};
use crate::observability::record_orphan_identity;

const WORKFLOW: &str = "register";
const GENERIC_FAILURE: &str = "An error occurred during registration";

/// Use case for registering a new user.
pub struct RegisterUserUseCase<I, D>
where
    I: IdentityGatewayPort,
    D: DirectoryStorePort,
{
    identity: Arc<I>,
    directory: Arc<D>,
}

impl<I, D> RegisterUserUseCase<I, D>
where
    I: IdentityGatewayPort,
    D: DirectoryStorePort,
{
    /// Create a new RegisterUserUseCase.
    pub const fn new(identity: Arc<I>, directory: Arc<D>) -> Self {
        Self {
            identity,
            directory,
        }
    }

    /// Execute the use case.
    ///
    /// Steps, short-circuiting on the first failure:
    /// 1. password confirmation, required fields, e-mail shape (no remote call)
    /// 2. username not taken
    /// 3. e-mail not taken
    /// 4. identity creation
    /// 5. profile insert keyed by the new identity's id
    pub async fn execute(
        &self,
        request: &RegisterUserDto,
    ) -> Result<RegistrationOutcome, JournalError> {
        let started = Instant::now();
        let result = self.register(request).await;
        observe(WORKFLOW, started, &result);
        result
    }

    async fn register(
        &self,
        request: &RegisterUserDto,
    ) -> Result<RegistrationOutcome, JournalError> {
        let (username, email) = validate(request)?;

        match self.directory.find_profile_by_username(&username).await {
            Ok(None) => {}
            Ok(Some(_)) => {
                return Err(JournalError::new(ErrorCode::UsernameTaken)
                    .with_context("username", username.as_str()));
            }
            Err(e) => {
                return Err(JournalError::transient(GENERIC_FAILURE)
                    .with_context("step", "find_profile_by_username")
                    .with_context("backend_error", e.to_string()));
            }
        }

        match self.directory.find_profile_by_email(&email).await {
            Ok(None) => {}
            Ok(Some(_)) => return Err(JournalError::new(ErrorCode::EmailTaken)),
            Err(e) => {
                return Err(JournalError::transient(GENERIC_FAILURE)
                    .with_context("step", "find_profile_by_email")
                    .with_context("backend_error", e.to_string()));
            }
        }

        let credentials = Credentials::new(email.clone(), request.password.as_str());
        let handle = self
            .identity
            .create_identity(&credentials)
            .await
            .map_err(map_identity_error)?;

        let new_profile = NewProfile {
            id: handle.user_id.clone(),
            full_name: request.full_name.clone(),
            phone_number: request.phone_number.clone(),
            username,
            email,
        };

        match self.directory.insert_profile(new_profile).await {
            Ok(profile) => {
                tracing::info!(
                    user_id = %profile.id,
                    username = %profile.username,
                    confirmation_pending = handle.session.is_none(),
                    "User registered"
                );
                Ok(RegistrationOutcome {
                    profile,
                    session: handle.session,
                })
            }
            Err(e) => {
                tracing::error!(
                    user_id = %handle.user_id,
                    error = %e,
                    "Profile insert failed after identity creation; identity has no profile"
                );
                record_orphan_identity();
                Err(JournalError::new(ErrorCode::ProfileCreationFailed)
                    .with_context("user_id", handle.user_id.as_str())
                    .with_context("backend_error", e.to_string()))
            }
        }
    }
}

/// Checks that need no remote call.
fn validate(request: &RegisterUserDto) -> Result<(Username, EmailAddress), JournalError> {
    if request.password != request.confirm_password {
        return Err(JournalError::new(ErrorCode::PasswordMismatch));
    }

    let blank = request.blank_fields();
    if !blank.is_empty() {
        return Err(JournalError::new(ErrorCode::MissingField).with_context("fields", blank.join(",")));
    }

    let email = EmailAddress::parse(&request.email).map_err(|e| {
        JournalError::new(ErrorCode::InvalidEmail).with_context("reason", e.to_string())
    })?;
    let username = Username::parse(&request.username).map_err(|e| {
        JournalError::new(ErrorCode::MissingField).with_context("reason", e.to_string())
    })?;

    Ok((username, email))
}

fn map_identity_error(error: IdentityError) -> JournalError {
    match error {
        IdentityError::AlreadyRegistered => JournalError::new(ErrorCode::EmailTaken)
            .with_context("source", "identity_provider"),
        IdentityError::InvalidCredentialsFormat { message } | IdentityError::Rejected { message } => {
            JournalError::identity_rejected(message)
        }
        IdentityError::InvalidCredentials => JournalError::transient(GENERIC_FAILURE)
            .with_context("step", "create_identity")
            .with_context("backend_error", "unexpected credentials refusal on sign-up"),
        IdentityError::TransientFailure { message } => JournalError::transient(GENERIC_FAILURE)
            .with_context("step", "create_identity")
            .with_context("backend_error", message),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{
        DirectoryError, IdentityHandle, MockDirectoryStorePort, MockIdentityGatewayPort,
    };
    use crate::application::use_cases::fixtures;
    use crate::domain::shared::{Timestamp, UserId};
    use crate::error::ErrorKind;
    use mockall::Sequence;

    fn jane() -> RegisterUserDto {
        RegisterUserDto {
            full_name: "Jane Doe".to_string(),
            phone_number: "555-0100".to_string(),
            email: "jane@x.com".to_string(),
            username: "jane".to_string(),
            password: "p1".to_string(),
            confirm_password: "p1".to_string(),
        }
    }

    fn use_case(
        identity: MockIdentityGatewayPort,
        directory: MockDirectoryStorePort,
    ) -> RegisterUserUseCase<MockIdentityGatewayPort, MockDirectoryStorePort> {
        RegisterUserUseCase::new(Arc::new(identity), Arc::new(directory))
    }

    fn handle_with_session() -> IdentityHandle {
        IdentityHandle {
            user_id: UserId::new("u-jane"),
            email: fixtures::email("jane@x.com"),
            session: Some(fixtures::session("u-jane", "jane@x.com")),
        }
    }

    #[tokio::test]
    async fn registers_in_order() {
        let mut seq = Sequence::new();
        let mut identity = MockIdentityGatewayPort::new();
        let mut directory = MockDirectoryStorePort::new();

        directory
            .expect_find_profile_by_username()
            .withf(|u| u.as_str() == "jane")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(None));
        directory
            .expect_find_profile_by_email()
            .withf(|e| e.as_str() == "jane@x.com")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(None));
        identity
            .expect_create_identity()
            .withf(|c| c.email.as_str() == "jane@x.com" && c.password() == "p1")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(handle_with_session()));
        directory
            .expect_insert_profile()
            .withf(|p| p.id.as_str() == "u-jane" && p.username.as_str() == "jane")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|p| Ok(p.into_profile(Timestamp::now())));

        let outcome = use_case(identity, directory).execute(&jane()).await.unwrap();

        assert_eq!(outcome.profile.username.as_str(), "jane");
        assert_eq!(outcome.profile.full_name, "Jane Doe");
        assert_eq!(outcome.profile.phone_number, "555-0100");
        assert_eq!(outcome.session.unwrap().user_id.as_str(), "u-jane");
    }

    #[tokio::test]
    async fn password_mismatch_makes_no_remote_call() {
        // Mocks without expectations panic if called
        let uc = use_case(MockIdentityGatewayPort::new(), MockDirectoryStorePort::new());
        let request = RegisterUserDto {
            confirm_password: "p2".to_string(),
            ..jane()
        };

        let err = uc.execute(&request).await.unwrap_err();

        assert_eq!(err.code(), ErrorCode::PasswordMismatch);
        assert_eq!(err.message(), "Passwords do not match");
        assert_eq!(err.kind(), ErrorKind::ValidationFailure);
    }

    #[tokio::test]
    async fn mismatch_is_reported_before_missing_fields() {
        let uc = use_case(MockIdentityGatewayPort::new(), MockDirectoryStorePort::new());
        let request = RegisterUserDto {
            full_name: String::new(),
            confirm_password: "p2".to_string(),
            ..jane()
        };

        let err = uc.execute(&request).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::PasswordMismatch);
    }

    #[tokio::test]
    async fn blank_field_makes_no_remote_call() {
        let uc = use_case(MockIdentityGatewayPort::new(), MockDirectoryStorePort::new());
        let request = RegisterUserDto {
            phone_number: "  ".to_string(),
            ..jane()
        };

        let err = uc.execute(&request).await.unwrap_err();

        assert_eq!(err.code(), ErrorCode::MissingField);
        assert_eq!(err.context_value("fields"), Some("phone_number"));
    }

    #[tokio::test]
    async fn malformed_email_makes_no_remote_call() {
        let uc = use_case(MockIdentityGatewayPort::new(), MockDirectoryStorePort::new());
        let request = RegisterUserDto {
            email: "jane-at-x.com".to_string(),
            ..jane()
        };

        let err = uc.execute(&request).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidEmail);
    }

    #[tokio::test]
    async fn taken_username_skips_identity_creation() {
        let mut directory = MockDirectoryStorePort::new();
        directory
            .expect_find_profile_by_username()
            .times(1)
            .returning(|_| Ok(Some(fixtures::profile("u-other", "jane", "other@x.com"))));

        let err = use_case(MockIdentityGatewayPort::new(), directory)
            .execute(&jane())
            .await
            .unwrap_err();

        assert_eq!(err.code(), ErrorCode::UsernameTaken);
        assert_eq!(err.kind(), ErrorKind::Conflict);
        assert_eq!(err.message(), "Username already exists");
    }

    #[tokio::test]
    async fn taken_email_skips_identity_creation() {
        let mut directory = MockDirectoryStorePort::new();
        directory
            .expect_find_profile_by_username()
            .returning(|_| Ok(None));
        directory
            .expect_find_profile_by_email()
            .times(1)
            .returning(|_| Ok(Some(fixtures::profile("u-other", "other", "jane@x.com"))));

        let err = use_case(MockIdentityGatewayPort::new(), directory)
            .execute(&jane())
            .await
            .unwrap_err();

        assert_eq!(err.code(), ErrorCode::EmailTaken);
        assert_eq!(err.message(), "Email already exists");
    }

    #[tokio::test]
    async fn provider_already_registered_is_email_taken() {
        let mut directory = MockDirectoryStorePort::new();
        directory
            .expect_find_profile_by_username()
            .returning(|_| Ok(None));
        directory
            .expect_find_profile_by_email()
            .returning(|_| Ok(None));
        let mut identity = MockIdentityGatewayPort::new();
        identity
            .expect_create_identity()
            .times(1)
            .returning(|_| Err(IdentityError::AlreadyRegistered));

        let err = use_case(identity, directory)
            .execute(&jane())
            .await
            .unwrap_err();

        assert_eq!(err.code(), ErrorCode::EmailTaken);
    }

    #[tokio::test]
    async fn provider_refusal_is_shown_verbatim() {
        let mut directory = MockDirectoryStorePort::new();
        directory
            .expect_find_profile_by_username()
            .returning(|_| Ok(None));
        directory
            .expect_find_profile_by_email()
            .returning(|_| Ok(None));
        let mut identity = MockIdentityGatewayPort::new();
        identity.expect_create_identity().returning(|_| {
            Err(IdentityError::InvalidCredentialsFormat {
                message: "Password should be at least 6 characters".to_string(),
            })
        });

        let err = use_case(identity, directory)
            .execute(&jane())
            .await
            .unwrap_err();

        assert_eq!(err.code(), ErrorCode::IdentityRejected);
        assert_eq!(err.message(), "Password should be at least 6 characters");
    }

    #[tokio::test]
    async fn profile_insert_failure_reports_profile_creation_failed() {
        let mut directory = MockDirectoryStorePort::new();
        directory
            .expect_find_profile_by_username()
            .returning(|_| Ok(None));
        directory
            .expect_find_profile_by_email()
            .returning(|_| Ok(None));
        directory.expect_insert_profile().times(1).returning(|_| {
            Err(DirectoryError::DuplicateKey {
                constraint: "profiles_username_key".to_string(),
            })
        });
        let mut identity = MockIdentityGatewayPort::new();
        identity
            .expect_create_identity()
            .times(1)
            .returning(|_| Ok(handle_with_session()));

        let err = use_case(identity, directory)
            .execute(&jane())
            .await
            .unwrap_err();

        assert_eq!(err.code(), ErrorCode::ProfileCreationFailed);
        assert_eq!(err.message(), "Error creating profile");
        assert_eq!(err.context_value("user_id"), Some("u-jane"));
        assert!(
            err.context_value("backend_error")
                .unwrap()
                .contains("profiles_username_key")
        );
    }

    #[tokio::test]
    async fn lookup_outage_is_transient_with_generic_message() {
        let mut directory = MockDirectoryStorePort::new();
        directory.expect_find_profile_by_username().returning(|_| {
            Err(DirectoryError::TransientFailure {
                message: "connection refused".to_string(),
            })
        });

        let err = use_case(MockIdentityGatewayPort::new(), directory)
            .execute(&jane())
            .await
            .unwrap_err();

        assert_eq!(err.code(), ErrorCode::TransientFailure);
        assert_eq!(err.message(), "An error occurred during registration");
        assert!(!err.message().contains("connection refused"));
    }

    #[tokio::test]
    async fn confirmation_pending_returns_no_session() {
        let mut directory = MockDirectoryStorePort::new();
        directory
            .expect_find_profile_by_username()
            .returning(|_| Ok(None));
        directory
            .expect_find_profile_by_email()
            .returning(|_| Ok(None));
        directory
            .expect_insert_profile()
            .returning(|p| Ok(p.into_profile(Timestamp::now())));
        let mut identity = MockIdentityGatewayPort::new();
        identity.expect_create_identity().returning(|_| {
            Ok(IdentityHandle {
                session: None,
                ..handle_with_session()
            })
        });

        let outcome = use_case(identity, directory).execute(&jane()).await.unwrap();
        assert!(outcome.session.is_none());
        assert_eq!(outcome.profile.id.as_str(), "u-jane");
    }
}
