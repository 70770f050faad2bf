//! Load Session Use Case
//!
//! Resolves the caller's token to a session, then loads the profile and the
//! trading accounts. A failure to list accounts does not fail the workflow:
//! the profile is returned with a notice attached.

use std::sync::Arc;
use std::time::Instant;

use super::observe;
use crate::application::dto::{ProfileView, SessionView};
use crate::application::ports::{
    AccessToken, DirectoryStorePort, IdentityError, IdentityGatewayPort,
};
use crate::domain::trading_account::AccountList;
use crate::error::{ErrorCode, JournalError};

const WORKFLOW: &str = "load_session";

/// Use case for loading the caller's profile and accounts.
pub struct LoadSessionUseCase<I, D>
where
    I: IdentityGatewayPort,
    D: DirectoryStorePort,
{
    identity: Arc<I>,
    directory: Arc<D>,
}

impl<I, D> LoadSessionUseCase<I, D>
where
    I: IdentityGatewayPort,
    D: DirectoryStorePort,
{
    /// Create a new LoadSessionUseCase.
    pub const fn new(identity: Arc<I>, directory: Arc<D>) -> Self {
        Self {
            identity,
            directory,
        }
    }

    /// Execute the use case.
    ///
    /// A missing, unknown or expired token yields [`SessionView::Unauthenticated`].
    pub async fn execute(&self, token: Option<&AccessToken>) -> Result<SessionView, JournalError> {
        let started = Instant::now();
        let result = self.load(token).await;
        observe(WORKFLOW, started, &result);
        result
    }

    async fn load(&self, token: Option<&AccessToken>) -> Result<SessionView, JournalError> {
        let Some(token) = token else {
            return Ok(SessionView::Unauthenticated);
        };

        let session = match self.identity.current_session(token).await {
            Ok(Some(session)) => session,
            Ok(None) => return Ok(SessionView::Unauthenticated),
            Err(IdentityError::TransientFailure { message }) => {
                return Err(JournalError::transient(ErrorCode::TransientFailure.user_message())
                    .with_context("step", "current_session")
                    .with_context("backend_error", message));
            }
            Err(e) => {
                tracing::debug!(error = %e, "Session lookup refused");
                return Ok(SessionView::Unauthenticated);
            }
        };

        let profile = self
            .directory
            .find_profile_by_id(&session.user_id)
            .await
            .map_err(|e| {
                JournalError::new(ErrorCode::ProfileLoadError)
                    .with_context("user_id", session.user_id.as_str())
                    .with_context("backend_error", e.to_string())
            })?
            .with_identity_email(session.email.clone());

        let (accounts, notice) = match self.directory.list_accounts_for_user(&session.user_id).await {
            Ok(accounts) => (AccountList::new(accounts), None),
            Err(e) => {
                tracing::warn!(
                    user_id = %session.user_id,
                    error = %e,
                    "Trading accounts failed to load; returning profile only"
                );
                let notice = JournalError::new(ErrorCode::AccountsLoadError)
                    .with_context("user_id", session.user_id.as_str())
                    .with_context("backend_error", e.to_string());
                (AccountList::default(), Some(notice))
            }
        };

        Ok(SessionView::Authenticated(ProfileView {
            profile,
            accounts,
            notice,
        }))
    }
}
