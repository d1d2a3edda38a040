//! Repository implementations
//!
//! Implementations of the `ReactionRepository` trait defined in reaction-core:
//! PostgreSQL for production and an in-memory store with identical semantics.

mod error;
mod memory;
mod reaction;

pub use error::{map_db_error, map_write_error};
pub use memory::InMemoryReactionRepository;
pub use reaction::PgReactionRepository;
