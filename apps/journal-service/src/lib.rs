// Allow unwrap/expect in tests - tests should panic on unexpected errors
// Allow test-specific patterns and pedantic lints in test code
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::significant_drop_tightening,
        clippy::too_many_lines,
        clippy::match_same_arms,
        clippy::needless_pass_by_value,
        clippy::needless_collect,
        clippy::option_if_let_else,
        clippy::default_trait_access,
        clippy::items_after_statements,
        clippy::or_fun_call
    )
)]

//! Journal Service - Rust Core Library
//!
//! Account and identity workflows for the trade journal: registration,
//! username login, session loading and trading-account creation on top of a
//! hosted auth API and a hosted table API that share no transaction.
//!
//! # Architecture (Clean Architecture + DDD + Hexagonal)
//!
//! ## Layers (inside → outside)
//!
//! - **Domain**: records and value objects
//!   - `identity`: `Profile`, `Username`, `EmailAddress`
//!   - `trading_account`: `TradingAccount`, `Balance`, `AccountList`
//!
//! - **Application**: Use cases and orchestration
//!   - `ports`: `IdentityGatewayPort`, `DirectoryStorePort`
//!   - `use_cases`: `RegisterUser`, `LoginUser`, `LoadSession`,
//!     `CreateTradingAccount`, `LogoutUser`
//!   - `dto`: form inputs and request-scoped views
//!
//! - **Infrastructure**: Adapters (implementations)
//!   - `backend`: hosted auth and table API adapters
//!   - `persistence`: in-memory adapters
//!   - `http`: REST API
//!   - `config`: dependency injection container

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

// =============================================================================
// Clean Architecture Layers
// =============================================================================

/// Domain layer - Core business logic with no external dependencies.
pub mod domain;

/// Application layer - Use cases and port definitions.
pub mod application;

/// Infrastructure layer - Adapters and external integrations.
pub mod infrastructure;

// =============================================================================
// Cross-cutting
// =============================================================================

/// Configuration loading and validation.
pub mod config;

/// Error taxonomy and HTTP error bodies.
pub mod error;

/// Prometheus metrics.
pub mod observability;

/// Logging and OpenTelemetry setup.
pub mod telemetry;

// =============================================================================
// Re-exports
// =============================================================================

pub use application::dto::{
    CreateTradingAccountDto, LoginUserDto, ProfileView, RegisterUserDto, RegistrationOutcome,
    SessionView,
};
pub use application::ports::{
    AccessToken, Credentials, DirectoryError, DirectoryStorePort, IdentityError,
    IdentityGatewayPort, IdentityHandle, Session,
};
pub use application::use_cases::{
    CreateTradingAccountUseCase, LoadSessionUseCase, LoginUserUseCase, LogoutUserUseCase,
    RegisterUserUseCase,
};
pub use domain::identity::{EmailAddress, NewProfile, Profile, Username};
pub use domain::shared::{AccountId, DomainError, Timestamp, UserId};
pub use domain::trading_account::{
    AccountList, AccountName, Balance, NewTradingAccount, TradingAccount,
};
pub use error::{ErrorCode, ErrorKind, HttpErrorResponse, JournalError};
