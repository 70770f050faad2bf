//! Domain errors for the trade journal.

use thiserror::Error;

/// Domain-level errors raised while constructing value objects.
///
/// These errors are independent of infrastructure concerns.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// Invalid value for a field.
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue {
        /// Field name.
        field: String,
        /// Error message.
        message: String,
    },

    /// Amount could not be parsed as a decimal number.
    #[error("Invalid amount: '{input}' is not a number")]
    InvalidAmount {
        /// Raw input as typed by the user.
        input: String,
    },
}

impl DomainError {
    /// Shorthand for [`DomainError::InvalidValue`].
    #[must_use]
    pub fn invalid_value(field: &str, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.to_string(),
            message: message.into(),
        }
    }

    /// Name of the offending field.
    #[must_use]
    pub fn field(&self) -> &str {
        match self {
            Self::InvalidValue { field, .. } => field,
            Self::InvalidAmount { .. } => "initial_balance",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_value_display() {
        let err = DomainError::invalid_value("username", "must not be blank");
        assert_eq!(
            err.to_string(),
            "Invalid value for 'username': must not be blank"
        );
        assert_eq!(err.field(), "username");
    }

    #[test]
    fn invalid_amount_display() {
        let err = DomainError::InvalidAmount {
            input: "abc".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid amount: 'abc' is not a number");
        assert_eq!(err.field(), "initial_balance");
    }
}
