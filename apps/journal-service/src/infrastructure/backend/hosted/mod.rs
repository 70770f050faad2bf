//! Hosted Backend Adapters
//!
//! The hosted backend exposes a GoTrue-style auth API under `/auth/v1` and a
//! PostgREST-style table API under `/rest/v1`, both behind one base URL and
//! one API key. Requests are sent once; the only time bound is the HTTP
//! client timeout.

mod api_types;
mod config;
mod directory_adapter;
mod error;
mod http_client;
mod identity_adapter;

pub use config::HostedBackendConfig;
pub use directory_adapter::HostedDirectoryStore;
pub use error::BackendError;
pub use identity_adapter::HostedIdentityGateway;
