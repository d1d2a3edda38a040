//! # reaction-core
//!
//! Domain layer containing reaction entities, value objects, repository traits,
//! and the capability traits host entities implement.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{ReactOutcome, Reaction, ReactionCounter, ReactionCounts, ToggleOutcome};
pub use error::DomainError;
pub use traits::{
    Reactable, ReactableLoader, ReactableRegistry, Reactor, ReactionFilter, ReactionRepository,
    RepoResult,
};
pub use value_objects::{EntityId, EntityIdParseError, ReactableRef, ReactionKind};
