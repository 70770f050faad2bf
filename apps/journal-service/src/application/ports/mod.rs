//! Application Ports (Driven)
//!
//! Interfaces to the two halves of the hosted backend. Neither offers
//! transactions, so the workflows own the ordering of calls and the handling
//! of partial failure.

mod directory_store_port;
mod identity_gateway_port;

pub use directory_store_port::{DirectoryError, DirectoryStorePort};
pub use identity_gateway_port::{
    AccessToken, Credentials, IdentityError, IdentityGatewayPort, IdentityHandle, Session,
};

#[cfg(test)]
pub use directory_store_port::MockDirectoryStorePort;
#[cfg(test)]
pub use identity_gateway_port::MockIdentityGatewayPort;
