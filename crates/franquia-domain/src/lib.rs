//! Domain types shared across all Franquia services.
//!
//! This crate contains only pure types with no framework dependencies.

pub mod pagination;
