//! Domain entities - core business objects

mod counter;
mod outcome;
mod reaction;

pub use counter::{ReactionCounter, ReactionCounts};
pub use outcome::{ReactOutcome, ToggleOutcome};
pub use reaction::Reaction;
