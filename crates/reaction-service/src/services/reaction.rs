//! Reaction service
//!
//! Operations on a single reactable target: like, dislike, undo, toggle,
//! queries against the records, and reads from the counter store.

use reaction_core::entities::{ReactOutcome, ReactionCounts, ToggleOutcome};
use reaction_core::traits::{ReactionFilter, ReactionRepository};
use reaction_core::value_objects::{EntityId, ReactableRef, ReactionKind};
use tracing::{debug, info, instrument};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Reaction service
pub struct ReactionService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ReactionService<'a> {
    /// Create a new ReactionService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    fn repo(&self) -> &dyn ReactionRepository {
        self.ctx.reaction_repo()
    }

    /// Set the user's reaction on `target` to `kind`
    #[instrument(skip(self, target), fields(target = %target))]
    pub async fn react(
        &self,
        target: &ReactableRef,
        user_id: EntityId,
        kind: ReactionKind,
    ) -> ServiceResult<ReactOutcome> {
        target.validate()?;

        let outcome = self.repo().react(target, user_id, kind).await?;

        match outcome {
            ReactOutcome::Unchanged => debug!(%user_id, %kind, "Reaction already present"),
            ReactOutcome::Created => info!(%user_id, %kind, "Reaction added"),
            ReactOutcome::Switched { from } => {
                info!(%user_id, %from, to = %kind, "Reaction switched");
            }
        }

        Ok(outcome)
    }

    /// Like `target`
    pub async fn like(&self, target: &ReactableRef, user_id: EntityId) -> ServiceResult<ReactOutcome> {
        self.react(target, user_id, ReactionKind::Like).await
    }

    /// Dislike `target`
    pub async fn dislike(&self, target: &ReactableRef, user_id: EntityId) -> ServiceResult<ReactOutcome> {
        self.react(target, user_id, ReactionKind::Dislike).await
    }

    /// Remove the user's `kind` reaction; `false` when they did not hold it
    #[instrument(skip(self, target), fields(target = %target))]
    pub async fn undo(
        &self,
        target: &ReactableRef,
        user_id: EntityId,
        kind: ReactionKind,
    ) -> ServiceResult<bool> {
        target.validate()?;

        let removed = self.repo().undo(target, user_id, kind).await?;

        if removed {
            info!(%user_id, %kind, "Reaction removed");
        } else {
            debug!(%user_id, %kind, "No matching reaction to remove");
        }

        Ok(removed)
    }

    pub async fn un_like(&self, target: &ReactableRef, user_id: EntityId) -> ServiceResult<bool> {
        self.undo(target, user_id, ReactionKind::Like).await
    }

    pub async fn un_dislike(&self, target: &ReactableRef, user_id: EntityId) -> ServiceResult<bool> {
        self.undo(target, user_id, ReactionKind::Dislike).await
    }

    /// Undo `kind` if the user holds it, otherwise react with it
    #[instrument(skip(self, target), fields(target = %target))]
    pub async fn toggle(
        &self,
        target: &ReactableRef,
        user_id: EntityId,
        kind: ReactionKind,
    ) -> ServiceResult<ToggleOutcome> {
        if self.reaction_of(target, user_id).await? == Some(kind) {
            self.undo(target, user_id, kind).await?;
            return Ok(ToggleOutcome::Removed);
        }

        let outcome = self.react(target, user_id, kind).await?;

        // Unchanged here means a concurrent call added the same reaction first
        Ok(Option::<ToggleOutcome>::from(outcome).unwrap_or(ToggleOutcome::Added))
    }

    /// Whether any record on `target` matches `filter`
    #[instrument(skip(self, target), fields(target = %target))]
    pub async fn has_reaction(&self, target: &ReactableRef, filter: &ReactionFilter) -> ServiceResult<bool> {
        Ok(self.count_matching(target, filter).await? > 0)
    }

    /// Number of records on `target` matching `filter`
    #[instrument(skip(self, target), fields(target = %target))]
    pub async fn count_matching(&self, target: &ReactableRef, filter: &ReactionFilter) -> ServiceResult<u64> {
        target.validate()?;
        Ok(self.repo().count_matching(target, filter).await?)
    }

    /// The user's current reaction on `target`, if any
    #[instrument(skip(self, target), fields(target = %target))]
    pub async fn reaction_of(
        &self,
        target: &ReactableRef,
        user_id: EntityId,
    ) -> ServiceResult<Option<ReactionKind>> {
        target.validate()?;
        let reaction = self.repo().find(target, user_id).await?;
        Ok(reaction.map(|r| r.response))
    }

    /// Counter snapshot; zero when no counter row exists
    #[instrument(skip(self, target), fields(target = %target))]
    pub async fn counts(&self, target: &ReactableRef) -> ServiceResult<ReactionCounts> {
        target.validate()?;
        let counter = self.repo().counter(target).await?;
        Ok(counter.map(|c| c.counts).unwrap_or_default())
    }

    /// Counter value for one kind
    pub async fn count(&self, target: &ReactableRef, kind: ReactionKind) -> ServiceResult<u64> {
        Ok(self.counts(target).await?.get(kind))
    }

    pub async fn like_percentage(&self, target: &ReactableRef) -> ServiceResult<u8> {
        Ok(self.counts(target).await?.like_percentage())
    }

    pub async fn dislike_percentage(&self, target: &ReactableRef) -> ServiceResult<u8> {
        Ok(self.counts(target).await?.dislike_percentage())
    }

    /// Users that reacted with `kind`, oldest first (limit clamped to 0..=100)
    #[instrument(skip(self, target), fields(target = %target))]
    pub async fn reactors(
        &self,
        target: &ReactableRef,
        kind: ReactionKind,
        limit: i64,
    ) -> ServiceResult<Vec<EntityId>> {
        target.validate()?;
        Ok(self.repo().find_users_by_kind(target, kind, limit).await?)
    }

    /// Remove every record and the counter row of `target`
    #[instrument(skip(self, target), fields(target = %target))]
    pub async fn delete_all(&self, target: &ReactableRef) -> ServiceResult<u64> {
        target.validate()?;

        let removed = self.repo().delete_for_reactable(target).await?;

        info!(removed, "Reactions cleared for deleted target");
        Ok(removed)
    }

    /// Deletion hook for host entities
    pub async fn on_reactable_deleted(&self, target: &ReactableRef) -> ServiceResult<u64> {
        self.delete_all(target).await
    }
}
