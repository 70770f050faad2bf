//! Registration and login DTOs

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::application::ports::Session;
use crate::domain::identity::Profile;

/// Registration form input.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct RegisterUserDto {
    /// Full name.
    pub full_name: String,
    /// Phone number.
    pub phone_number: String,
    /// E-mail address.
    pub email: String,
    /// Desired username.
    pub username: String,
    /// Password.
    pub password: String,
    /// Password confirmation.
    pub confirm_password: String,
}

impl RegisterUserDto {
    /// Names of required fields that are blank, in form order.
    #[must_use]
    pub fn blank_fields(&self) -> Vec<&'static str> {
        [
            ("full_name", &self.full_name),
            ("phone_number", &self.phone_number),
            ("email", &self.email),
            ("username", &self.username),
            ("password", &self.password),
            ("confirm_password", &self.confirm_password),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect()
    }
}

impl fmt::Debug for RegisterUserDto {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterUserDto")
            .field("full_name", &self.full_name)
            .field("phone_number", &self.phone_number)
            .field("email", &self.email)
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

/// Login form input.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct LoginUserDto {
    /// Username.
    pub username: String,
    /// Password.
    pub password: String,
}

impl fmt::Debug for LoginUserDto {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginUserDto")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

/// Result of a successful registration.
#[derive(Debug, Clone)]
pub struct RegistrationOutcome {
    /// The stored profile.
    pub profile: Profile,
    /// Session from sign-up; `None` when e-mail confirmation is pending.
    pub session: Option<Session>,
}
