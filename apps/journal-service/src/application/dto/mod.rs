//! Data Transfer Objects (DTOs)
//!
//! Workflow inputs (borrowed by the use cases so the caller keeps its form
//! input on failure) and the request-scoped views the workflows return.

mod account_dto;
mod auth_dto;
mod session_dto;

pub use account_dto::CreateTradingAccountDto;
pub use auth_dto::{LoginUserDto, RegisterUserDto, RegistrationOutcome};
pub use session_dto::{ProfileView, SessionView};
