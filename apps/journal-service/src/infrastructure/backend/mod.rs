//! Backend Adapters
//!
//! Implementations of `IdentityGatewayPort` and `DirectoryStorePort` for the
//! hosted backend.

pub mod hosted;

pub use hosted::{BackendError, HostedBackendConfig, HostedDirectoryStore, HostedIdentityGateway};
