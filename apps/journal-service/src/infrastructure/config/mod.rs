//! Infrastructure configuration and wiring.

mod container;

pub use container::{Container, build_router};
