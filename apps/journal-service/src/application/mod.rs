//! Application Layer
//!
//! Workflows that orchestrate the identity provider and the directory store
//! through ports. Each workflow call is one logical flow: its remote calls run
//! strictly in sequence and all state it touches is request-scoped.

pub mod dto;
pub mod ports;
pub mod use_cases;
