//! Username and e-mail value objects.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::shared::DomainError;

/// A unique, human-chosen login name.
///
/// Surrounding whitespace is trimmed; the remainder must be non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Username(String);

impl Username {
    /// Parse a username.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidValue` if the input is blank.
    pub fn parse(value: &str) -> Result<Self, DomainError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(DomainError::invalid_value("username", "must not be blank"));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Get the username string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Username {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Username> for String {
    fn from(value: Username) -> Self {
        value.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An e-mail address as accepted by the identity provider.
///
/// Only the shape is checked: exactly one `@` with a non-empty local part
/// and a non-empty domain. Deliverability is the provider's concern.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Parse an e-mail address.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidValue` if the address is malformed.
    pub fn parse(value: &str) -> Result<Self, DomainError> {
        let trimmed = value.trim();
        let mut parts = trimmed.split('@');
        let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(DomainError::invalid_value(
                "email",
                "must contain exactly one '@'",
            ));
        };
        if local.is_empty() || domain.is_empty() {
            return Err(DomainError::invalid_value(
                "email",
                "local part and domain must not be empty",
            ));
        }
        if trimmed.chars().any(char::is_whitespace) {
            return Err(DomainError::invalid_value(
                "email",
                "must not contain whitespace",
            ));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Get the address string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
