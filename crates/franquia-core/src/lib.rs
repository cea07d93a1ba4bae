//! Shared HTTP plumbing for Franquia services.

pub mod middleware;
pub mod serde;
pub mod tracing;
