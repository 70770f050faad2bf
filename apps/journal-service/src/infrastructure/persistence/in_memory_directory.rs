//! In-memory directory store.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use chrono::Duration;

use crate::application::ports::{DirectoryError, DirectoryStorePort};
use crate::domain::identity::{EmailAddress, NewProfile, Profile, Username};
use crate::domain::shared::{AccountId, Timestamp, UserId};
use crate::domain::trading_account::{NewTradingAccount, TradingAccount};

#[derive(Debug, Default)]
struct DirectoryState {
    profiles: HashMap<UserId, Profile>,
    accounts: Vec<TradingAccount>,
    last_created_at: Option<Timestamp>,
}

impl DirectoryState {
    /// Insert timestamps strictly increase so newest-first order is total.
    fn next_created_at(&mut self) -> Timestamp {
        let now = Timestamp::now();
        let next = match self.last_created_at {
            Some(last) if now <= last => {
                Timestamp::new(last.as_datetime() + Duration::microseconds(1))
            }
            _ => now,
        };
        self.last_created_at = Some(next);
        next
    }
}

/// In-memory implementation of `DirectoryStorePort`.
///
/// Enforces unique profile `id`, `username` and `email`, and rejects accounts
/// whose owner has no profile.
#[derive(Debug, Default)]
pub struct InMemoryDirectoryStore {
    state: RwLock<DirectoryState>,
}

impl InMemoryDirectoryStore {
    /// Create a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, DirectoryState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, DirectoryState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Number of stored profiles.
    #[must_use]
    pub fn profile_count(&self) -> usize {
        self.read().profiles.len()
    }

    /// Number of stored trading accounts.
    #[must_use]
    pub fn account_count(&self) -> usize {
        self.read().accounts.len()
    }

    /// Total number of stored rows.
    #[must_use]
    pub fn len(&self) -> usize {
        let state = self.read();
        state.profiles.len() + state.accounts.len()
    }

    /// Check if the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove all rows.
    pub fn clear(&self) {
        let mut state = self.write();
        state.profiles.clear();
        state.accounts.clear();
    }

    fn find_profile(&self, predicate: impl Fn(&Profile) -> bool) -> Vec<Profile> {
        self.read()
            .profiles
            .values()
            .filter(|p| predicate(p))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl DirectoryStorePort for InMemoryDirectoryStore {
    async fn find_profile_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<Profile>, DirectoryError> {
        let rows = self.find_profile(|p| &p.username == username);
        DirectoryError::single_row(rows, "profile", username.as_str())
    }

    async fn find_profile_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<Profile>, DirectoryError> {
        let rows = self.find_profile(|p| &p.email == email);
        DirectoryError::single_row(rows, "profile", email.as_str())
    }

    async fn find_profile_by_id(&self, id: &UserId) -> Result<Profile, DirectoryError> {
        self.read()
            .profiles
            .get(id)
            .cloned()
            .ok_or_else(|| DirectoryError::NotFound {
                entity: "profile".to_string(),
                key: id.to_string(),
            })
    }

    async fn insert_profile(&self, profile: NewProfile) -> Result<Profile, DirectoryError> {
        let mut state = self.write();

        let duplicate = |constraint: &str| DirectoryError::DuplicateKey {
            constraint: constraint.to_string(),
        };
        if state.profiles.contains_key(&profile.id) {
            return Err(duplicate("profiles_pkey"));
        }
        if state.profiles.values().any(|p| p.username == profile.username) {
            return Err(duplicate("profiles_username_key"));
        }
        if state.profiles.values().any(|p| p.email == profile.email) {
            return Err(duplicate("profiles_email_key"));
        }

        let created_at = state.next_created_at();
        let stored = profile.into_profile(created_at);
        state.profiles.insert(stored.id.clone(), stored.clone());
        Ok(stored)
    }

    async fn list_accounts_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<TradingAccount>, DirectoryError> {
        let mut accounts: Vec<TradingAccount> = self
            .read()
            .accounts
            .iter()
            .filter(|a| &a.user_id == user_id)
            .cloned()
            .collect();
        accounts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(accounts)
    }

    async fn insert_account(
        &self,
        account: NewTradingAccount,
    ) -> Result<TradingAccount, DirectoryError> {
        let mut state = self.write();

        if !state.profiles.contains_key(account.user_id()) {
            return Err(DirectoryError::ValidationFailure {
                message: format!(
                    "insert on trading_accounts violates foreign key: no profile {}",
                    account.user_id()
                ),
            });
        }

        let created_at = state.next_created_at();
        let stored = account.into_account(AccountId::generate(), created_at);
        state.accounts.push(stored.clone());
        Ok(stored)
    }
}
