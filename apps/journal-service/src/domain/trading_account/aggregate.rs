//! Trading account records.

use serde::{Deserialize, Serialize};

use super::value_objects::{AccountName, Balance};
use crate::domain::shared::{AccountId, Timestamp, UserId};

/// A named balance container owned by a profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradingAccount {
    /// Generated on insert.
    pub id: AccountId,
    /// Owning profile's id.
    pub user_id: UserId,
    /// Account label.
    pub name: AccountName,
    /// Balance at creation; never mutated.
    pub initial_balance: Balance,
    /// Running balance; starts equal to `initial_balance`.
    pub current_balance: Balance,
    /// Assigned by the store on insert.
    pub created_at: Timestamp,
    /// Assigned by the store on insert.
    pub updated_at: Timestamp,
}

/// Insert payload for a trading account.
///
/// [`NewTradingAccount::open`] is the only constructor, so a freshly opened
/// account always has `current_balance == initial_balance`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewTradingAccount {
    user_id: UserId,
    name: AccountName,
    initial_balance: Balance,
    current_balance: Balance,
}

impl NewTradingAccount {
    /// Open a new account for `user_id` with the given starting balance.
    #[must_use]
    pub const fn open(user_id: UserId, name: AccountName, initial_balance: Balance) -> Self {
        Self {
            user_id,
            name,
            initial_balance,
            current_balance: initial_balance,
        }
    }

    /// Owning user.
    #[must_use]
    pub const fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Account label.
    #[must_use]
    pub const fn name(&self) -> &AccountName {
        &self.name
    }

    /// Starting balance.
    #[must_use]
    pub const fn initial_balance(&self) -> Balance {
        self.initial_balance
    }

    /// Current balance (equal to the starting balance until stored).
    #[must_use]
    pub const fn current_balance(&self) -> Balance {
        self.current_balance
    }

    /// Materialize the stored record once the store has assigned id and timestamp.
    #[must_use]
    pub fn into_account(self, id: AccountId, created_at: Timestamp) -> TradingAccount {
        TradingAccount {
            id,
            user_id: self.user_id,
            name: self.name,
            initial_balance: self.initial_balance,
            current_balance: self.current_balance,
            created_at,
            updated_at: created_at,
        }
    }
}
