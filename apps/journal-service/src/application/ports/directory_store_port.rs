//! Directory Store Port (Driven Port)
//!
//! Interface to the relational store holding `profiles` (one per user, unique
//! `username` and `email`) and `trading_accounts` (many per user).
//!
//! Lookups use single-row semantics: zero rows is "absent", one row is the
//! value, more than one row is [`DirectoryError::AmbiguousMatch`].

use async_trait::async_trait;

use crate::domain::identity::{EmailAddress, NewProfile, Profile, Username};
use crate::domain::shared::UserId;
use crate::domain::trading_account::{NewTradingAccount, TradingAccount};

/// Directory store error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DirectoryError {
    /// No row matched a lookup that requires one.
    #[error("{entity} not found: {key}")]
    NotFound {
        /// Entity type.
        entity: String,
        /// Lookup key.
        key: String,
    },

    /// A uniqueness constraint rejected the insert.
    #[error("Duplicate key violates constraint '{constraint}'")]
    DuplicateKey {
        /// Constraint name.
        constraint: String,
    },

    /// The store rejected the payload.
    #[error("Validation failure: {message}")]
    ValidationFailure {
        /// Error details.
        message: String,
    },

    /// More than one row matched a single-row lookup.
    #[error("Expected one {entity} for {key}, found {rows}")]
    AmbiguousMatch {
        /// Entity type.
        entity: String,
        /// Lookup key.
        key: String,
        /// Number of rows returned.
        rows: usize,
    },

    /// Network or service failure. Not retried.
    #[error("Directory store unavailable: {message}")]
    TransientFailure {
        /// Error details.
        message: String,
    },
}

impl DirectoryError {
    /// Apply single-row semantics to a lookup result.
    ///
    /// # Errors
    ///
    /// Returns `AmbiguousMatch` if more than one row is present.
    pub fn single_row<T>(mut rows: Vec<T>, entity: &str, key: &str) -> Result<Option<T>, Self> {
        match rows.len() {
            0 => Ok(None),
            1 => Ok(rows.pop()),
            n => Err(Self::AmbiguousMatch {
                entity: entity.to_string(),
                key: key.to_string(),
                rows: n,
            }),
        }
    }
}

/// Port for the profile and trading-account tables.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DirectoryStorePort: Send + Sync {
    /// Look up a profile by username.
    async fn find_profile_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<Profile>, DirectoryError>;

    /// Look up a profile by e-mail (pre-registration duplicate check).
    async fn find_profile_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<Profile>, DirectoryError>;

    /// Load the profile of a user. `NotFound` if none exists.
    async fn find_profile_by_id(&self, id: &UserId) -> Result<Profile, DirectoryError>;

    /// Insert a profile; the store assigns timestamps.
    async fn insert_profile(&self, profile: NewProfile) -> Result<Profile, DirectoryError>;

    /// List a user's accounts, newest first. No pagination.
    async fn list_accounts_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<TradingAccount>, DirectoryError>;

    /// Insert an account; the store assigns id and timestamps.
    async fn insert_account(
        &self,
        account: NewTradingAccount,
    ) -> Result<TradingAccount, DirectoryError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_row_semantics() {
        assert_eq!(
            DirectoryError::single_row(Vec::<u8>::new(), "profile", "jane"),
            Ok(None)
        );
        assert_eq!(
            DirectoryError::single_row(vec![7_u8], "profile", "jane"),
            Ok(Some(7))
        );
        assert_eq!(
            DirectoryError::single_row(vec![1_u8, 2], "profile", "jane"),
            Err(DirectoryError::AmbiguousMatch {
                entity: "profile".to_string(),
                key: "jane".to_string(),
                rows: 2,
            })
        );
    }

    #[test]
    fn error_display() {
        let err = DirectoryError::DuplicateKey {
            constraint: "profiles_username_key".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Duplicate key violates constraint 'profiles_username_key'"
        );
    }
}
