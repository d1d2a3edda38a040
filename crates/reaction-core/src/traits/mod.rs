//! Domain traits - storage seam, capabilities, and target resolution

mod capabilities;
mod repositories;
mod resolver;

pub use capabilities::{Reactable, Reactor};
pub use repositories::{ReactionFilter, ReactionRepository, RepoResult};
pub use resolver::{ReactableLoader, ReactableRegistry};
