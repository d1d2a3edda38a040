//! Reactor service
//!
//! The user's side of reactions: what a user has liked or disliked, resolved
//! back into host entities, and cleanup when the user goes away.

use reaction_core::traits::{ReactableRegistry, Reactor};
use reaction_core::value_objects::{ReactableRef, ReactionKind};
use tracing::{info, instrument, warn};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Reactor service
pub struct ReactorService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ReactorService<'a> {
    /// Create a new ReactorService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Targets the user reacted to with `kind`, oldest first
    #[instrument(skip(self, reactor), fields(user_id = %reactor.reactor_id()))]
    pub async fn reacted_targets<R>(&self, reactor: &R, kind: ReactionKind) -> ServiceResult<Vec<ReactableRef>>
    where
        R: Reactor + ?Sized,
    {
        let reactions = self
            .ctx
            .reaction_repo()
            .find_by_user(reactor.reactor_id(), Some(kind))
            .await?;

        Ok(reactions.into_iter().map(|r| r.target).collect())
    }

    /// Entities the user reacted to with `kind`, oldest first
    ///
    /// Targets whose loader finds nothing are skipped. An unregistered type
    /// fails with `UnknownReactableType`.
    #[instrument(skip(self, reactor, registry), fields(user_id = %reactor.reactor_id()))]
    pub async fn list_reactions<R, E>(
        &self,
        reactor: &R,
        kind: ReactionKind,
        registry: &ReactableRegistry<E>,
    ) -> ServiceResult<Vec<E>>
    where
        R: Reactor + ?Sized,
    {
        let targets = self.reacted_targets(reactor, kind).await?;
        let mut entities = Vec::with_capacity(targets.len());

        for target in &targets {
            match registry.resolve(target).await? {
                Some(entity) => entities.push(entity),
                None => warn!(%target, "Reacted target no longer exists, skipping"),
            }
        }

        Ok(entities)
    }

    /// Entities the user liked
    pub async fn likes<R, E>(&self, reactor: &R, registry: &ReactableRegistry<E>) -> ServiceResult<Vec<E>>
    where
        R: Reactor + ?Sized,
    {
        self.list_reactions(reactor, ReactionKind::Like, registry).await
    }

    /// Entities the user disliked
    pub async fn dislikes<R, E>(&self, reactor: &R, registry: &ReactableRegistry<E>) -> ServiceResult<Vec<E>>
    where
        R: Reactor + ?Sized,
    {
        self.list_reactions(reactor, ReactionKind::Dislike, registry).await
    }

    /// Remove all of the user's reactions, keeping every affected counter in sync
    ///
    /// Hosts call this before deleting the user row; the foreign key cascade
    /// alone would leave counters too high.
    #[instrument(skip(self, reactor), fields(user_id = %reactor.reactor_id()))]
    pub async fn delete_all<R>(&self, reactor: &R) -> ServiceResult<u64>
    where
        R: Reactor + ?Sized,
    {
        let removed = self
            .ctx
            .reaction_repo()
            .delete_for_user(reactor.reactor_id())
            .await?;

        info!(removed, "Reactions removed for user");
        Ok(removed)
    }
}
