//! Hosted directory store implementing DirectoryStorePort.

use async_trait::async_trait;

use crate::application::ports::{DirectoryError, DirectoryStorePort};
use crate::domain::identity::{EmailAddress, NewProfile, Profile, Username};
use crate::domain::shared::UserId;
use crate::domain::trading_account::{NewTradingAccount, TradingAccount};

use super::config::HostedBackendConfig;
use super::error::BackendError;
use super::http_client::{BackendHttpClient, BackendRequest};

const PROFILES_PATH: &str = "/rest/v1/profiles";
const ACCOUNTS_PATH: &str = "/rest/v1/trading_accounts";

/// Directory store backed by the hosted table API.
///
/// Rows deserialize directly into the domain records; an invalid username or
/// e-mail in a stored row surfaces as a transient failure.
#[derive(Debug, Clone)]
pub struct HostedDirectoryStore {
    client: BackendHttpClient,
}

impl HostedDirectoryStore {
    /// Create a new store.
    pub fn new(config: &HostedBackendConfig) -> Result<Self, BackendError> {
        Ok(Self {
            client: BackendHttpClient::new(config)?,
        })
    }

    async fn find_profile(
        &self,
        operation: &str,
        column: &str,
        value: &str,
    ) -> Result<Option<Profile>, DirectoryError> {
        let filter = format!("eq.{value}");
        let query = [(column, filter.as_str()), ("select", "*")];

        let rows: Vec<Profile> = self
            .client
            .send(operation, BackendRequest::get(PROFILES_PATH).query(&query))
            .await?;

        DirectoryError::single_row(rows, "profile", value)
    }

    async fn insert_returning<T, B>(
        &self,
        operation: &str,
        path: &str,
        entity: &str,
        body: &B,
    ) -> Result<T, DirectoryError>
    where
        T: serde::de::DeserializeOwned + Send,
        B: serde::Serialize + Sync,
    {
        let rows: Vec<T> = self
            .client
            .send(operation, BackendRequest::post(path, body).returning())
            .await?;

        DirectoryError::single_row(rows, entity, "insert")?.ok_or_else(|| {
            DirectoryError::TransientFailure {
                message: format!("{entity} insert returned no row"),
            }
        })
    }
}

#[async_trait]
impl DirectoryStorePort for HostedDirectoryStore {
    async fn find_profile_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<Profile>, DirectoryError> {
        self.find_profile("find_profile_by_username", "username", username.as_str())
            .await
    }

    async fn find_profile_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<Profile>, DirectoryError> {
        self.find_profile("find_profile_by_email", "email", email.as_str())
            .await
    }

    async fn find_profile_by_id(&self, id: &UserId) -> Result<Profile, DirectoryError> {
        self.find_profile("find_profile_by_id", "id", id.as_str())
            .await?
            .ok_or_else(|| DirectoryError::NotFound {
                entity: "profile".to_string(),
                key: id.to_string(),
            })
    }

    async fn insert_profile(&self, profile: NewProfile) -> Result<Profile, DirectoryError> {
        self.insert_returning("insert_profile", PROFILES_PATH, "profile", &profile)
            .await
    }

    async fn list_accounts_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<TradingAccount>, DirectoryError> {
        let filter = format!("eq.{user_id}");
        let query = [
            ("user_id", filter.as_str()),
            ("select", "*"),
            ("order", "created_at.desc"),
        ];

        let accounts = self
            .client
            .send(
                "list_accounts_for_user",
                BackendRequest::get(ACCOUNTS_PATH).query(&query),
            )
            .await?;
        Ok(accounts)
    }

    async fn insert_account(
        &self,
        account: NewTradingAccount,
    ) -> Result<TradingAccount, DirectoryError> {
        self.insert_returning("insert_account", ACCOUNTS_PATH, "trading_account", &account)
            .await
    }
}
