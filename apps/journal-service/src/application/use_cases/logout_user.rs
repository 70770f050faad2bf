//! Logout User Use Case

use std::sync::Arc;
use std::time::Instant;

use super::observe;
use crate::application::ports::{AccessToken, IdentityError, IdentityGatewayPort};
use crate::error::{ErrorCode, JournalError};

const WORKFLOW: &str = "logout";

/// Use case for ending the caller's session.
pub struct LogoutUserUseCase<I>
where
    I: IdentityGatewayPort,
{
    identity: Arc<I>,
}

impl<I> LogoutUserUseCase<I>
where
    I: IdentityGatewayPort,
{
    /// Create a new LogoutUserUseCase.
    pub const fn new(identity: Arc<I>) -> Self {
        Self { identity }
    }

    /// Execute the use case. A token that is already invalid counts as logged out.
    pub async fn execute(&self, token: &AccessToken) -> Result<(), JournalError> {
        let started = Instant::now();
        let result = match self.identity.end_session(token).await {
            Ok(()) => Ok(()),
            Err(IdentityError::TransientFailure { message }) => {
                Err(JournalError::transient(ErrorCode::TransientFailure.user_message())
                    .with_context("step", "end_session")
                    .with_context("backend_error", message))
            }
            Err(e) => {
                tracing::debug!(error = %e, "Session already ended");
                Ok(())
            }
        };
        observe(WORKFLOW, started, &result);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::MockIdentityGatewayPort;

    #[tokio::test]
    async fn ends_session() {
        let mut identity = MockIdentityGatewayPort::new();
        identity
            .expect_end_session()
            .withf(|t| t.expose() == "t-1")
            .times(1)
            .returning(|_| Ok(()));

        LogoutUserUseCase::new(Arc::new(identity))
            .execute(&AccessToken::new("t-1"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn expired_token_counts_as_success() {
        let mut identity = MockIdentityGatewayPort::new();
        identity
            .expect_end_session()
            .returning(|_| Err(IdentityError::InvalidCredentials));

        let result = LogoutUserUseCase::new(Arc::new(identity))
            .execute(&AccessToken::new("old"))
            .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn outage_is_reported() {
        let mut identity = MockIdentityGatewayPort::new();
        identity.expect_end_session().returning(|_| {
            Err(IdentityError::TransientFailure {
                message: "timeout".to_string(),
            })
        });

        let err = LogoutUserUseCase::new(Arc::new(identity))
            .execute(&AccessToken::new("t"))
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::TransientFailure);
    }
}
