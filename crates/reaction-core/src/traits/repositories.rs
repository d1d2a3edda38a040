//! Repository traits - abstract storage interface
//!
//! The record store and the counter store live behind one trait because every
//! write touches both and must be atomic across them.

use async_trait::async_trait;

use crate::entities::{ReactOutcome, Reaction, ReactionCounter};
use crate::error::DomainError;
use crate::value_objects::{EntityId, ReactableRef, ReactionKind};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

/// Filter for counting reaction records on a target
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReactionFilter {
    /// Accepted responses (empty = any)
    pub kinds: Vec<ReactionKind>,
    /// Restrict to one user
    pub user_id: Option<EntityId>,
}

impl ReactionFilter {
    /// Match every record
    pub fn any() -> Self {
        Self::default()
    }

    /// Match a single response kind
    pub fn kind(kind: ReactionKind) -> Self {
        Self {
            kinds: vec![kind],
            user_id: None,
        }
    }

    /// Restrict to a user
    pub fn by_user(mut self, user_id: EntityId) -> Self {
        self.user_id = Some(user_id);
        self
    }

    /// Check whether a record passes the filter
    pub fn matches(&self, reaction: &Reaction) -> bool {
        (self.kinds.is_empty() || self.kinds.contains(&reaction.response))
            && self.user_id.map_or(true, |id| id == reaction.user_id)
    }

    /// Storage strings of the accepted kinds (all kinds when empty)
    pub fn kind_strs(&self) -> Vec<&'static str> {
        if self.kinds.is_empty() {
            ReactionKind::ALL.iter().map(|k| k.as_str()).collect()
        } else {
            self.kinds.iter().map(|k| k.as_str()).collect()
        }
    }
}

// ============================================================================
// Reaction Repository
// ============================================================================

#[async_trait]
pub trait ReactionRepository: Send + Sync {
    /// Find a user's reaction on a target
    async fn find(&self, target: &ReactableRef, user_id: EntityId) -> RepoResult<Option<Reaction>>;

    /// Create or flip a user's reaction and adjust the counter row atomically
    async fn react(
        &self,
        target: &ReactableRef,
        user_id: EntityId,
        kind: ReactionKind,
    ) -> RepoResult<ReactOutcome>;

    /// Remove a user's reaction of `kind` and decrement the counter; false when absent
    async fn undo(&self, target: &ReactableRef, user_id: EntityId, kind: ReactionKind) -> RepoResult<bool>;

    /// Count reaction records on a target matching a filter
    async fn count_matching(&self, target: &ReactableRef, filter: &ReactionFilter) -> RepoResult<u64>;

    /// Get the counter row for a target
    async fn counter(&self, target: &ReactableRef) -> RepoResult<Option<ReactionCounter>>;

    /// List a user's reactions, oldest first
    async fn find_by_user(&self, user_id: EntityId, kind: Option<ReactionKind>) -> RepoResult<Vec<Reaction>>;

    /// Users who reacted to a target with `kind`, oldest first
    async fn find_users_by_kind(
        &self,
        target: &ReactableRef,
        kind: ReactionKind,
        limit: i64,
    ) -> RepoResult<Vec<EntityId>>;

    /// Delete every record and the counter row of a target; returns records removed
    async fn delete_for_reactable(&self, target: &ReactableRef) -> RepoResult<u64>;

    /// Delete every record of a user, keeping counters in sync; returns records removed
    async fn delete_for_user(&self, user_id: EntityId) -> RepoResult<u64>;
}
