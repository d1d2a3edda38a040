//! Integration test utilities for the reaction crates
//!
//! Host-side fixtures (entities, users, loaders) and helpers for running the
//! services against PostgreSQL.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
