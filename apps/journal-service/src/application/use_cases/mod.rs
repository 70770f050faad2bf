//! Application Use Cases
//!
//! One use case per workflow. Each converts every failure into a single
//! [`JournalError`] at its boundary, logs the outcome and records it in the
//! workflow metrics.

mod create_trading_account;
mod load_session;
mod login_user;
mod logout_user;
mod register_user;

pub use create_trading_account::CreateTradingAccountUseCase;
pub use load_session::LoadSessionUseCase;
pub use login_user::LoginUserUseCase;
pub use logout_user::LogoutUserUseCase;
pub use register_user::RegisterUserUseCase;

use std::time::Instant;

use crate::error::{ErrorKind, JournalError};
use crate::observability::record_workflow;

/// Log and record the outcome of a workflow run.
fn observe<T>(workflow: &'static str, started: Instant, result: &Result<T, JournalError>) {
    let elapsed = started.elapsed();
    let elapsed_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);

    match result {
        Ok(_) => {
            tracing::info!(workflow, elapsed_ms, "Workflow succeeded");
            record_workflow(workflow, "success", elapsed.as_secs_f64());
        }
        Err(error) => {
            if error.kind() == ErrorKind::TransientFailure {
                tracing::error!(
                    workflow,
                    elapsed_ms,
                    code = %error.code(),
                    context = ?error.context(),
                    "Workflow failed"
                );
            } else {
                tracing::warn!(
                    workflow,
                    elapsed_ms,
                    code = %error.code(),
                    context = ?error.context(),
                    "Workflow rejected"
                );
            }
            record_workflow(workflow, error.code().reason(), elapsed.as_secs_f64());
        }
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::application::ports::{AccessToken, Session};
    use crate::domain::identity::{EmailAddress, NewProfile, Profile, Username};
    use crate::domain::shared::{AccountId, Timestamp, UserId};
    use crate::domain::trading_account::{
        AccountName, Balance, NewTradingAccount, TradingAccount,
    };

    pub fn email(value: &str) -> EmailAddress {
        EmailAddress::parse(value).unwrap()
    }

    pub fn profile(id: &str, username: &str, address: &str) -> Profile {
        NewProfile {
            id: UserId::new(id),
            full_name: "Jane Doe".to_string(),
            phone_number: "555-0100".to_string(),
            username: Username::parse(username).unwrap(),
            email: email(address),
        }
        .into_profile(Timestamp::now())
    }

    pub fn session(user_id: &str, address: &str) -> Session {
        Session {
            access_token: AccessToken::new(format!("token-{user_id}")),
            refresh_token: None,
            expires_at: None,
            user_id: UserId::new(user_id),
            email: email(address),
        }
    }

    pub fn account(id: &str, user_id: &str, name: &str) -> TradingAccount {
        NewTradingAccount::open(
            UserId::new(user_id),
            AccountName::parse(name).unwrap(),
            Balance::ZERO,
        )
        .into_account(AccountId::new(id), Timestamp::now())
    }
}
