//! Profile record.

use serde::{Deserialize, Serialize};

use super::value_objects::{EmailAddress, Username};
use crate::domain::shared::{Timestamp, UserId};

/// The application record describing a user.
///
/// One-to-one with an identity: `id` is the identity provider's user id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Identity-provider user id (primary key).
    pub id: UserId,
    /// Full name as entered at registration.
    pub full_name: String,
    /// Phone number as entered at registration.
    pub phone_number: String,
    /// Unique login name.
    pub username: Username,
    /// Unique e-mail address, consistent with the identity record.
    pub email: EmailAddress,
    /// Assigned by the store on insert.
    pub created_at: Timestamp,
    /// Assigned by the store on insert.
    pub updated_at: Timestamp,
}

impl Profile {
    /// Replace the stored e-mail with the one reported by the identity provider.
    ///
    /// The provider is authoritative for e-mail; the profile row keeps a copy
    /// for the pre-registration duplicate check.
    #[must_use]
    pub fn with_identity_email(mut self, email: EmailAddress) -> Self {
        self.email = email;
        self
    }
}

/// Insert payload for a profile. Timestamps are assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProfile {
    /// Identity-provider user id returned by sign-up.
    pub id: UserId,
    /// Full name.
    pub full_name: String,
    /// Phone number.
    pub phone_number: String,
    /// Login name.
    pub username: Username,
    /// E-mail address.
    pub email: EmailAddress,
}

impl NewProfile {
    /// Materialize the stored record once the store has assigned timestamps.
    #[must_use]
    pub fn into_profile(self, created_at: Timestamp) -> Profile {
        Profile {
            id: self.id,
            full_name: self.full_name,
            phone_number: self.phone_number,
            username: self.username,
            email: self.email,
            created_at,
            updated_at: created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jane() -> NewProfile {
        NewProfile {
            id: UserId::new("u-1"),
            full_name: "Jane Doe".to_string(),
            phone_number: "555-0100".to_string(),
            username: Username::parse("jane").unwrap(),
            email: EmailAddress::parse("jane@x.com").unwrap(),
        }
    }

    #[test]
    fn into_profile_sets_both_timestamps() {
        let at = Timestamp::parse("2026-01-19T12:00:00Z").unwrap();
        let profile = jane().into_profile(at);
        assert_eq!(profile.id.as_str(), "u-1");
        assert_eq!(profile.created_at, at);
        assert_eq!(profile.updated_at, at);
    }

    #[test]
    fn identity_email_wins() {
        let profile = jane().into_profile(Timestamp::now());
        let updated = profile.with_identity_email(EmailAddress::parse("jane@y.com").unwrap());
        assert_eq!(updated.email.as_str(), "jane@y.com");
        assert_eq!(updated.username.as_str(), "jane");
    }

    #[test]
    fn profile_serializes_with_column_names() {
        let at = Timestamp::parse("2026-01-19T12:00:00Z").unwrap();
        let json = serde_json::to_value(jane().into_profile(at)).unwrap();
        assert_eq!(json["full_name"], "Jane Doe");
        assert_eq!(json["phone_number"], "555-0100");
        assert_eq!(json["username"], "jane");
    }
}
