//! Infrastructure Layer
//!
//! Adapters for the ports defined in the application layer:
//!
//! - **Driven Adapters (Outbound)**
//!   - `backend/`: hosted auth and table API adapters
//!   - `persistence/`: in-memory stand-ins for local development and tests
//!
//! - **Driver Adapters (Inbound)**
//!   - `http/`: REST API controllers
//!
//! - `config/`: dependency injection container

pub mod backend;
pub mod config;
pub mod http;
pub mod persistence;
