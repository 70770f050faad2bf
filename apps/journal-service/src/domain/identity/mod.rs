//! Identity Bounded Context
//!
//! A profile is the application record of an authenticated identity. It is
//! created once, right after the identity, keyed by the provider's user id,
//! and its `username` and `email` never change afterwards.

pub mod profile;
pub mod value_objects;

pub use profile::{NewProfile, Profile};
pub use value_objects::{EmailAddress, Username};
