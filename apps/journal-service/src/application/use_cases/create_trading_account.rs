//! Create Trading Account Use Case

use std::sync::Arc;
use std::time::Instant;

use super::observe;
use crate::application::dto::CreateTradingAccountDto;
use crate::application::ports::{
    AccessToken, DirectoryStorePort, IdentityError, IdentityGatewayPort, Session,
};
use crate::domain::trading_account::{
    AccountList, AccountName, Balance, NewTradingAccount, TradingAccount,
};
use crate::error::{ErrorCode, JournalError};

const WORKFLOW: &str = "create_trading_account";
const GENERIC_FAILURE: &str = "An error occurred while creating the account";

/// Use case for opening a trading account for the session's user.
pub struct CreateTradingAccountUseCase<I, D>
where
    I: IdentityGatewayPort,
    D: DirectoryStorePort,
{
    identity: Arc<I>,
    directory: Arc<D>,
}

impl<I, D> CreateTradingAccountUseCase<I, D>
where
    I: IdentityGatewayPort,
    D: DirectoryStorePort,
{
    /// Create a new CreateTradingAccountUseCase.
    pub const fn new(identity: Arc<I>, directory: Arc<D>) -> Self {
        Self {
            identity,
            directory,
        }
    }

    /// Execute the use case.
    ///
    /// On success the stored account is prepended to `view` and returned.
    /// On any failure `view` is left as it was.
    pub async fn execute(
        &self,
        token: &AccessToken,
        view: &mut AccountList,
        request: &CreateTradingAccountDto,
    ) -> Result<TradingAccount, JournalError> {
        let started = Instant::now();
        let result = self.create(token, request).await;
        if let Ok(account) = &result {
            view.prepend(account.clone());
        }
        observe(WORKFLOW, started, &result);
        result
    }

    /// Step 1 on its own: resolve `token` to a live session.
    ///
    /// Callers that cannot build a request (e.g. an unreadable form body) run
    /// this first so a stale session is still reported as `UNAUTHENTICATED`.
    pub async fn require_session(&self, token: &AccessToken) -> Result<Session, JournalError> {
        match self.identity.current_session(token).await {
            Ok(Some(session)) => Ok(session),
            Ok(None) => Err(JournalError::unauthenticated()),
            Err(IdentityError::TransientFailure { message }) => {
                Err(JournalError::transient(GENERIC_FAILURE)
                    .with_context("step", "current_session")
                    .with_context("backend_error", message))
            }
            Err(e) => Err(JournalError::unauthenticated().with_context("reason", e.to_string())),
        }
    }

    async fn create(
        &self,
        token: &AccessToken,
        request: &CreateTradingAccountDto,
    ) -> Result<TradingAccount, JournalError> {
        let session = self.require_session(token).await?;

        let name = AccountName::parse(&request.name).map_err(|e| {
            JournalError::new(ErrorCode::InvalidAccountName).with_context("reason", e.to_string())
        })?;
        let initial_balance = Balance::parse(&request.initial_balance).map_err(|e| {
            JournalError::new(ErrorCode::InvalidAmount).with_context("reason", e.to_string())
        })?;

        let account = NewTradingAccount::open(session.user_id.clone(), name, initial_balance);
        let stored = self.directory.insert_account(account).await.map_err(|e| {
            JournalError::new(ErrorCode::AccountCreationFailed)
                .with_context("user_id", session.user_id.as_str())
                .with_context("backend_error", e.to_string())
        })?;

        tracing::info!(
            user_id = %stored.user_id,
            account_id = %stored.id,
            initial_balance = %stored.initial_balance,
            "Trading account created"
        );
        Ok(stored)
    }
}
