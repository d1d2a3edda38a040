//! Reaction counter - denormalized per-target totals

use serde::{Deserialize, Serialize};

use crate::value_objects::{ReactableRef, ReactionKind};

/// Denormalized counter row for one reactable entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReactionCounter {
    pub id: i64,
    pub target: ReactableRef,
    pub counts: ReactionCounts,
}

/// Like/dislike totals for a target
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReactionCounts {
    pub likes: u64,
    pub dislikes: u64,
}

impl ReactionCounts {
    /// Create a new ReactionCounts
    pub const fn new(likes: u64, dislikes: u64) -> Self {
        Self { likes, dislikes }
    }

    /// Count for one kind
    #[inline]
    pub const fn get(&self, kind: ReactionKind) -> u64 {
        match kind {
            ReactionKind::Like => self.likes,
            ReactionKind::Dislike => self.dislikes,
        }
    }

    /// Total number of reactions
    #[inline]
    pub const fn total(&self) -> u64 {
        self.likes + self.dislikes
    }

    /// Apply a signed change to one kind, saturating at zero
    pub fn apply(&mut self, kind: ReactionKind, delta: i64) {
        let slot = match kind {
            ReactionKind::Like => &mut self.likes,
            ReactionKind::Dislike => &mut self.dislikes,
        };
        *slot = slot.saturating_add_signed(delta);
    }

    /// Share of `kind` in all reactions as a rounded percentage (0 when empty)
    pub fn percentage(&self, kind: ReactionKind) -> u8 {
        let total = self.total();
        if total == 0 {
            return 0;
        }
        ((self.get(kind) as f64 / total as f64) * 100.0).round() as u8
    }

    /// Rounded like share, 0 when there are no reactions
    #[inline]
    pub fn like_percentage(&self) -> u8 {
        self.percentage(ReactionKind::Like)
    }

    /// Rounded dislike share, 0 when there are no reactions
    #[inline]
    pub fn dislike_percentage(&self) -> u8 {
        self.percentage(ReactionKind::Dislike)
    }
}
