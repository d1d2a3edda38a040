//! Reaction database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for reactions table
#[derive(Debug, Clone, FromRow)]
pub struct ReactionModel {
    pub id: i64,
    pub reactable_type: String,
    pub reactable_id: i64,
    pub user_id: i64,
    pub response: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Database model for reaction_counters table
#[derive(Debug, Clone, FromRow)]
pub struct ReactionCounterModel {
    pub id: i64,
    pub reactable_type: String,
    pub reactable_id: i64,
    pub like_count: i64,
    pub dislike_count: i64,
}

/// Row returned by the react upsert (`xmax = 0` only for fresh inserts)
#[derive(Debug, Clone, FromRow)]
pub struct ReactUpsertModel {
    pub inserted: bool,
}

/// Row returned when deleting a user's reactions
#[derive(Debug, Clone, FromRow)]
pub struct RemovedReactionModel {
    pub reactable_type: String,
    pub reactable_id: i64,
    pub response: String,
}
