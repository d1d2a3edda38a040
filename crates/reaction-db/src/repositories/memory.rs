//! In-memory implementation of ReactionRepository
//!
//! Same record and counter semantics as the PostgreSQL repository. Each
//! operation runs under a single lock, which gives the record/counter pair the atomicity a
//! transaction gives in PostgreSQL.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::Mutex;
use tracing::{debug, instrument};

use reaction_core::entities::{ReactOutcome, Reaction, ReactionCounter, ReactionCounts};
use reaction_core::traits::{ReactionFilter, ReactionRepository, RepoResult};
use reaction_core::value_objects::{EntityId, ReactableRef, ReactionKind};

#[derive(Default)]
struct MemoryState {
    next_reaction_id: i64,
    next_counter_id: i64,
    reactions: HashMap<(ReactableRef, EntityId), Reaction>,
    counters: HashMap<ReactableRef, ReactionCounter>,
}

impl MemoryState {
    fn apply_delta(&mut self, target: &ReactableRef, kind: ReactionKind, delta: i64) {
        if let Some(counter) = self.counters.get_mut(target) {
            counter.counts.apply(kind, delta);
            return;
        }
        if delta <= 0 {
            return;
        }

        self.next_counter_id += 1;
        let mut counts = ReactionCounts::default();
        counts.apply(kind, delta);
        self.counters.insert(
            target.clone(),
            ReactionCounter {
                id: self.next_counter_id,
                target: target.clone(),
                counts,
            },
        );
    }
}

// Ids are assigned in insertion order
fn oldest_first(reactions: &mut [Reaction]) {
    reactions.sort_by_key(|r| r.id);
}

/// In-memory implementation of ReactionRepository
///
/// There is no `users` table here, so reactor ids are never checked. A react
/// for a user that does not exist succeeds, where PostgreSQL rejects it with
/// `DomainError::ValidationError` through the foreign key.
#[derive(Default)]
pub struct InMemoryReactionRepository {
    state: Mutex<MemoryState>,
}

impl InMemoryReactionRepository {
    /// Create an empty repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored reaction records
    pub fn len(&self) -> usize {
        self.state.lock().reactions.len()
    }

    /// Whether no records are stored
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of stored counter rows
    pub fn counter_rows(&self) -> usize {
        self.state.lock().counters.len()
    }
}

#[async_trait]
impl ReactionRepository for InMemoryReactionRepository {
    #[instrument(skip(self))]
    async fn find(&self, target: &ReactableRef, user_id: EntityId) -> RepoResult<Option<Reaction>> {
        let state = self.state.lock();
        Ok(state.reactions.get(&(target.clone(), user_id)).cloned())
    }

    #[instrument(skip(self))]
    async fn react(
        &self,
        target: &ReactableRef,
        user_id: EntityId,
        kind: ReactionKind,
    ) -> RepoResult<ReactOutcome> {
        let mut guard = self.state.lock();
        let state = &mut *guard;
        let key = (target.clone(), user_id);

        let outcome = match state.reactions.get_mut(&key) {
            Some(existing) if existing.is(kind) => ReactOutcome::Unchanged,
            Some(existing) => {
                let from = existing.response;
                existing.set_response(kind);
                ReactOutcome::Switched { from }
            }
            None => {
                state.next_reaction_id += 1;
                let mut reaction = Reaction::new(target.clone(), user_id, kind);
                reaction.id = state.next_reaction_id;
                state.reactions.insert(key, reaction);
                ReactOutcome::Created
            }
        };

        for (k, delta) in outcome.counter_deltas(kind) {
            state.apply_delta(target, k, delta);
        }

        debug!(?outcome, "React applied");
        Ok(outcome)
    }

    #[instrument(skip(self))]
    async fn undo(&self, target: &ReactableRef, user_id: EntityId, kind: ReactionKind) -> RepoResult<bool> {
        let mut guard = self.state.lock();
        let state = &mut *guard;
        let key = (target.clone(), user_id);

        match state.reactions.get(&key) {
            Some(existing) if existing.is(kind) => {
                state.reactions.remove(&key);
                state.apply_delta(target, kind, -1);
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    #[instrument(skip(self))]
    async fn count_matching(&self, target: &ReactableRef, filter: &ReactionFilter) -> RepoResult<u64> {
        let state = self.state.lock();
        let count = state
            .reactions
            .values()
            .filter(|r| &r.target == target && filter.matches(r))
            .count();
        Ok(count as u64)
    }

    #[instrument(skip(self))]
    async fn counter(&self, target: &ReactableRef) -> RepoResult<Option<ReactionCounter>> {
        Ok(self.state.lock().counters.get(target).cloned())
    }

    #[instrument(skip(self))]
    async fn find_by_user(&self, user_id: EntityId, kind: Option<ReactionKind>) -> RepoResult<Vec<Reaction>> {
        let state = self.state.lock();
        let mut results: Vec<Reaction> = state
            .reactions
            .values()
            .filter(|r| r.user_id == user_id && kind.map_or(true, |k| r.is(k)))
            .cloned()
            .collect();
        oldest_first(&mut results);
        Ok(results)
    }

    #[instrument(skip(self))]
    async fn find_users_by_kind(
        &self,
        target: &ReactableRef,
        kind: ReactionKind,
        limit: i64,
    ) -> RepoResult<Vec<EntityId>> {
        let limit = limit.clamp(0, 100) as usize;
        let state = self.state.lock();
        let mut matching: Vec<Reaction> = state
            .reactions
            .values()
            .filter(|r| &r.target == target && r.is(kind))
            .cloned()
            .collect();
        oldest_first(&mut matching);
        Ok(matching.into_iter().take(limit).map(|r| r.user_id).collect())
    }

    #[instrument(skip(self))]
    async fn delete_for_reactable(&self, target: &ReactableRef) -> RepoResult<u64> {
        let mut state = self.state.lock();
        let before = state.reactions.len();
        state.reactions.retain(|(t, _), _| t != target);
        state.counters.remove(target);
        Ok((before - state.reactions.len()) as u64)
    }

    #[instrument(skip(self))]
    async fn delete_for_user(&self, user_id: EntityId) -> RepoResult<u64> {
        let mut guard = self.state.lock();
        let state = &mut *guard;
        let keys: Vec<(ReactableRef, EntityId)> = state
            .reactions
            .keys()
            .filter(|(_, u)| *u == user_id)
            .cloned()
            .collect();

        for key in &keys {
            if let Some(removed) = state.reactions.remove(key) {
                state.apply_delta(&removed.target, removed.response, -1);
            }
        }

        Ok(keys.len() as u64)
    }
}
