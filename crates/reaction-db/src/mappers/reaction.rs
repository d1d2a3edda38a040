//! Reaction entity <-> model mappers

use reaction_core::entities::{ReactOutcome, Reaction, ReactionCounter, ReactionCounts};
use reaction_core::error::DomainError;
use reaction_core::value_objects::{EntityId, ReactableRef, ReactionKind};

use crate::models::{ReactionCounterModel, ReactionModel};

/// Convert ReactionModel to Reaction entity (fails on an unknown response string)
impl TryFrom<ReactionModel> for Reaction {
    type Error = DomainError;

    fn try_from(model: ReactionModel) -> Result<Self, Self::Error> {
        Ok(Reaction {
            id: model.id,
            target: ReactableRef::new(model.reactable_type, EntityId::new(model.reactable_id)),
            user_id: EntityId::new(model.user_id),
            response: model.response.parse()?,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

/// Convert ReactionCounterModel to ReactionCounter entity
impl From<ReactionCounterModel> for ReactionCounter {
    fn from(model: ReactionCounterModel) -> Self {
        ReactionCounter {
            id: model.id,
            target: ReactableRef::new(model.reactable_type, EntityId::new(model.reactable_id)),
            counts: ReactionCounts::new(
                u64::try_from(model.like_count).unwrap_or(0),
                u64::try_from(model.dislike_count).unwrap_or(0),
            ),
        }
    }
}

/// Bind values identifying a target row
pub struct TargetKey<'a> {
    pub reactable_type: &'a str,
    pub reactable_id: i64,
}

impl<'a> TargetKey<'a> {
    pub fn new(target: &'a ReactableRef) -> Self {
        Self {
            reactable_type: &target.reactable_type,
            reactable_id: target.reactable_id.into_inner(),
        }
    }
}

/// Signed change to a counter row
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CounterDelta {
    pub likes: i64,
    pub dislikes: i64,
}

impl CounterDelta {
    /// Delta for a single kind
    pub fn of(kind: ReactionKind, delta: i64) -> Self {
        let mut out = Self::default();
        out.add(kind, delta);
        out
    }

    /// Delta implied by a react outcome
    pub fn from_outcome(outcome: ReactOutcome, kind: ReactionKind) -> Self {
        let mut out = Self::default();
        for (k, d) in outcome.counter_deltas(kind) {
            out.add(k, d);
        }
        out
    }

    pub fn add(&mut self, kind: ReactionKind, delta: i64) {
        match kind {
            ReactionKind::Like => self.likes += delta,
            ReactionKind::Dislike => self.dislikes += delta,
        }
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.likes == 0 && self.dislikes == 0
    }

    /// No component increments, so a missing counter row needs no insert
    #[inline]
    pub fn is_decrement_only(&self) -> bool {
        self.likes <= 0 && self.dislikes <= 0
    }
}
