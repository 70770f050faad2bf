//! Session view DTOs

use crate::domain::identity::Profile;
use crate::domain::trading_account::AccountList;
use crate::error::JournalError;

/// What an authenticated caller sees: profile, accounts and an optional notice.
#[derive(Debug, Clone)]
pub struct ProfileView {
    /// The caller's profile; e-mail taken from the identity provider.
    pub profile: Profile,
    /// Accounts, newest first. Empty when loading them failed.
    pub accounts: AccountList,
    /// Set when the view is only partially loaded.
    pub notice: Option<JournalError>,
}

impl ProfileView {
    /// Returns true if every part of the view loaded.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.notice.is_none()
    }
}

/// Outcome of the session workflow.
#[derive(Debug, Clone)]
pub enum SessionView {
    /// No valid session was presented.
    Unauthenticated,
    /// Session resolved to a profile.
    Authenticated(ProfileView),
}

impl SessionView {
    /// The profile view, if authenticated.
    #[must_use]
    pub const fn profile_view(&self) -> Option<&ProfileView> {
        match self {
            Self::Unauthenticated => None,
            Self::Authenticated(view) => Some(view),
        }
    }
}
