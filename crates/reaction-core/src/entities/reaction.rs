//! Reaction entity - one user's like or dislike on a reactable entity

use chrono::{DateTime, Utc};

use crate::value_objects::{EntityId, ReactableRef, ReactionKind};

/// Reaction record (one row per user and target)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reaction {
    pub id: i64,
    pub target: ReactableRef,
    pub user_id: EntityId,
    pub response: ReactionKind,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Reaction {
    /// Create a new, not yet persisted, Reaction
    pub fn new(target: ReactableRef, user_id: EntityId, response: ReactionKind) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            target,
            user_id,
            response,
            created_at: now,
            updated_at: now,
        }
    }

    /// Check if the reaction has a specific response
    #[inline]
    pub fn is(&self, kind: ReactionKind) -> bool {
        self.response == kind
    }

    /// Flip the response in place
    pub fn set_response(&mut self, response: ReactionKind) {
        self.response = response;
        self.updated_at = Utc::now();
    }
}
