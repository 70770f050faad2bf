//! The caller's newest-first list of trading accounts.

use serde::{Deserialize, Serialize};

use super::aggregate::TradingAccount;

/// Newest-first list of a user's trading accounts.
///
/// Loaded once per session view and then extended locally: a newly created
/// account is prepended instead of re-fetching the list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountList(Vec<TradingAccount>);

impl AccountList {
    /// Wrap accounts already ordered newest-first.
    #[must_use]
    pub const fn new(accounts: Vec<TradingAccount>) -> Self {
        Self(accounts)
    }

    /// Put a newly created account at the front.
    pub fn prepend(&mut self, account: TradingAccount) {
        self.0.insert(0, account);
    }

    /// Number of accounts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if there are no accounts.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Most recently created account, if any.
    #[must_use]
    pub fn newest(&self) -> Option<&TradingAccount> {
        self.0.first()
    }

    /// Iterate newest-first.
    pub fn iter(&self) -> std::slice::Iter<'_, TradingAccount> {
        self.0.iter()
    }

    /// Borrow as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[TradingAccount] {
        &self.0
    }
}

impl From<Vec<TradingAccount>> for AccountList {
    fn from(accounts: Vec<TradingAccount>) -> Self {
        Self(accounts)
    }
}

impl<'a> IntoIterator for &'a AccountList {
    type Item = &'a TradingAccount;
    type IntoIter = std::slice::Iter<'a, TradingAccount>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
