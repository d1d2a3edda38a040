//! Value objects - immutable types that represent domain concepts

mod entity_id;
mod reactable_ref;
mod reaction_kind;

pub use entity_id::{EntityId, EntityIdParseError};
pub use reactable_ref::ReactableRef;
pub use reaction_kind::ReactionKind;
