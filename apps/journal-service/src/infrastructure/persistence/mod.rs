//! In-memory adapters.
//!
//! Stand-ins for the hosted backend, used with `backend.mode: memory` and in
//! tests. They enforce the same constraints the hosted store does.

mod in_memory_directory;
mod in_memory_identity;

pub use in_memory_directory::InMemoryDirectoryStore;
pub use in_memory_identity::InMemoryIdentityGateway;
