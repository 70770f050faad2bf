//! Trading Account Bounded Context
//!
//! Named balance containers owned by a profile. Accounts are created on an
//! explicit user action and never updated or deleted here.
//!
//! # Key Concepts
//!
//! - **Balances**: `initial_balance` is fixed at creation; `current_balance`
//!   starts equal to it but is stored independently
//! - **Account list**: the caller's newest-first view, extended by prepending

pub mod account_list;
pub mod aggregate;
pub mod value_objects;

pub use account_list::AccountList;
pub use aggregate::{NewTradingAccount, TradingAccount};
pub use value_objects::{AccountName, Balance};
