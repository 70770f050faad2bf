//! Domain Layer
//!
//! The innermost layer: value objects and records with no infrastructure
//! dependencies. Persistence and authentication are reached through the
//! application ports, never from here.
//!
//! # Bounded Contexts
//!
//! - [`identity`]: Profiles and the values that identify a user (username, e-mail)
//! - [`trading_account`]: Named balance containers owned by a profile
//! - [`shared`]: Identifiers, timestamps and domain errors

pub mod identity;
pub mod shared;
pub mod trading_account;
