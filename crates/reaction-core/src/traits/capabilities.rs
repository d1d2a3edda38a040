//! Capability traits implemented by host entity types

use crate::value_objects::{EntityId, ReactableRef};

/// An entity that can receive likes and dislikes
///
/// ```
/// use reaction_core::{EntityId, Reactable};
///
/// struct Post {
///     id: i64,
/// }
///
/// impl Reactable for Post {
///     const REACTABLE_TYPE: &'static str = "post";
///
///     fn reactable_id(&self) -> EntityId {
///         EntityId::new(self.id)
///     }
/// }
///
/// let target = Post { id: 3 }.reactable_ref();
/// assert_eq!(target.to_string(), "post:3");
/// ```
pub trait Reactable {
    /// Type tag stored in `reactable_type`
    const REACTABLE_TYPE: &'static str;

    /// Primary key of this entity
    fn reactable_id(&self) -> EntityId;

    /// Tagged reference used by the reaction stores
    fn reactable_ref(&self) -> ReactableRef {
        ReactableRef::new(Self::REACTABLE_TYPE, self.reactable_id())
    }
}

/// A user that can issue reactions
pub trait Reactor {
    fn reactor_id(&self) -> EntityId;
}

impl Reactor for EntityId {
    fn reactor_id(&self) -> EntityId {
        *self
    }
}
