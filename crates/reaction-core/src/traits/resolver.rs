//! Polymorphic target resolution
//!
//! A reaction row only knows `{reactable_type, reactable_id}`. The host registers
//! one loader per type tag so stored references can be turned back into entities.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::DomainError;
use crate::value_objects::{EntityId, ReactableRef};

use super::capabilities::Reactable;
use super::repositories::RepoResult;

/// Loads entities of one reactable type by id
#[async_trait]
pub trait ReactableLoader<E>: Send + Sync {
    /// Load the entity, `None` when it no longer exists
    async fn load(&self, id: EntityId) -> RepoResult<Option<E>>;
}

/// Lookup table `reactable_type -> loader`
pub struct ReactableRegistry<E> {
    loaders: HashMap<String, Arc<dyn ReactableLoader<E>>>,
}

impl<E> Default for ReactableRegistry<E> {
    fn default() -> Self {
        Self {
            loaders: HashMap::new(),
        }
    }
}

impl<E> fmt::Debug for ReactableRegistry<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut types: Vec<_> = self.loaders.keys().collect();
        types.sort();
        f.debug_struct("ReactableRegistry")
            .field("types", &types)
            .finish()
    }
}

impl<E> ReactableRegistry<E> {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a loader under an explicit type tag, replacing any previous one
    pub fn register(
        mut self,
        reactable_type: impl Into<String>,
        loader: Arc<dyn ReactableLoader<E>>,
    ) -> Self {
        self.loaders.insert(reactable_type.into(), loader);
        self
    }

    /// Register a loader under `T::REACTABLE_TYPE`
    pub fn register_type<T: Reactable>(self, loader: Arc<dyn ReactableLoader<E>>) -> Self {
        self.register(T::REACTABLE_TYPE, loader)
    }

    /// Check if a type tag has a loader
    pub fn contains(&self, reactable_type: &str) -> bool {
        self.loaders.contains_key(reactable_type)
    }

    /// Resolve a stored reference into its entity
    pub async fn resolve(&self, target: &ReactableRef) -> RepoResult<Option<E>> {
        let loader = self
            .loaders
            .get(&target.reactable_type)
            .ok_or_else(|| DomainError::UnknownReactableType(target.reactable_type.clone()))?;

        loader.load(target.reactable_id).await
    }
}
