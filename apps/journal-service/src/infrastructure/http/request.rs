//! HTTP request DTOs.
//!
//! Field names match the web form (`fullName`, `confirmPassword`, ...).
//! Missing fields deserialize as blank so the workflows report them.

use serde::{Deserialize, Serialize};

use crate::application::dto::{CreateTradingAccountDto, LoginUserDto, RegisterUserDto};

/// Registration form.
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RegisterRequest {
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

impl From<RegisterRequest> for RegisterUserDto {
    fn from(request: RegisterRequest) -> Self {
        Self {
            full_name: request.full_name,
            phone_number: request.phone_number,
            email: request.email,
            username: request.username,
            password: request.password,
            confirm_password: request.confirm_password,
        }
    }
}

/// Login form.
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoginRequest {
    /// Username.
    pub username: String,
    /// Password.
    pub password: String,
}

impl From<LoginRequest> for LoginUserDto {
    fn from(request: LoginRequest) -> Self {
        Self {
            username: request.username,
            password: request.password,
        }
    }
}

/// Balance as typed in the form, or as a JSON number.
///
/// JSON numbers pass through `f64`, so trailing zeros are dropped
/// (`1000.00` arrives as `1000.0`); send text to keep the scale. Any other
/// JSON value is kept as-is and rejected by the balance parser.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BalanceInput {
    /// Text input.
    Text(String),
    /// Numeric input.
    Number(serde_json::Number),
    /// `null`, booleans, arrays and objects.
    Other(serde_json::Value),
}

impl Default for BalanceInput {
    fn default() -> Self {
        Self::Text(String::new())
    }
}

impl BalanceInput {
    /// The balance as text, for parsing by the workflow. `null` is blank.
    #[must_use]
    pub fn into_text(self) -> String {
        match self {
            Self::Text(text) => text,
            Self::Number(number) => number.to_string(),
            Self::Other(serde_json::Value::Null) => String::new(),
            Self::Other(value) => value.to_string(),
        }
    }
}

/// Create-account form.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateAccountRequest {
    /// Account label.
    pub name: String,
    /// Starting balance.
    pub initial_balance: BalanceInput,
}

impl From<CreateAccountRequest> for CreateTradingAccountDto {
    fn from(request: CreateAccountRequest) -> Self {
        Self {
            name: request.name,
            initial_balance: request.initial_balance.into_text(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn register_request_uses_form_field_names() {
        let request: RegisterRequest = serde_json::from_str(
            r#"{"fullName":"Jane Doe","phoneNumber":"555","email":"jane@x.com","username":"jane","password":"p1","confirmPassword":"p1"}"#,
        )
        .unwrap();
        let dto = RegisterUserDto::from(request);
        assert_eq!(dto.full_name, "Jane Doe");
        assert_eq!(dto.confirm_password, "p1");
        assert!(dto.blank_fields().is_empty());
    }

    #[test]
    fn missing_fields_are_blank() {
        let request: RegisterRequest = serde_json::from_str(r#"{"email":"jane@x.com"}"#).unwrap();
        let dto = RegisterUserDto::from(request);
        assert_eq!(dto.blank_fields().len(), 5);
    }

    #[test]
    fn balance_accepts_text_or_number() {
        let text: CreateAccountRequest =
            serde_json::from_str(r#"{"name":"Main","initialBalance":"1000.50"}"#).unwrap();
        assert_eq!(CreateTradingAccountDto::from(text).initial_balance, "1000.50");

        let number: CreateAccountRequest =
            serde_json::from_str(r#"{"name":"Main","initialBalance":250}"#).unwrap();
        assert_eq!(CreateTradingAccountDto::from(number).initial_balance, "250");
    }

    #[test_case("true", "true" ; "boolean")]
    #[test_case(r#"{"x":1}"#, r#"{"x":1}"# ; "object")]
    #[test_case("[1000]", "[1000]" ; "array")]
    #[test_case("null", "" ; "null is blank")]
    fn non_numeric_balance_reaches_the_workflow(raw: &str, expected: &str) {
        let request: CreateAccountRequest =
            serde_json::from_str(&format!(r#"{{"name":"Main","initialBalance":{raw}}}"#)).unwrap();
        assert_eq!(CreateTradingAccountDto::from(request).initial_balance, expected);
    }

    #[test]
    fn numeric_balance_drops_trailing_zeros() {
        let request: CreateAccountRequest =
            serde_json::from_str(r#"{"name":"Main","initialBalance":1000.00}"#).unwrap();
        assert_eq!(CreateTradingAccountDto::from(request).initial_balance, "1000.0");
    }

    #[test]
    fn missing_balance_is_blank() {
        let request: CreateAccountRequest = serde_json::from_str(r#"{"name":"Main"}"#).unwrap();
        assert_eq!(CreateTradingAccountDto::from(request).initial_balance, "");
    }
}
