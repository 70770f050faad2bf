//! Shared Value Objects
//!
//! Immutable domain types used across bounded contexts.

mod identifiers;
mod timestamp;

pub use identifiers::{AccountId, UserId};
pub use timestamp::Timestamp;
