//! PostgreSQL implementation of ReactionRepository
//!
//! Every write runs in one transaction covering both `reactions` and
//! `reaction_counters`. The existence check and the row change are a single
//! statement (`ON CONFLICT ... RETURNING` / `DELETE ... RETURNING`), so two
//! concurrent calls for the same user and target cannot both count.

use std::collections::BTreeMap;

use async_trait::async_trait;
use sqlx::{PgConnection, PgPool};
use tracing::{debug, instrument};

use reaction_core::entities::{ReactOutcome, Reaction, ReactionCounter};
use reaction_core::traits::{ReactionFilter, ReactionRepository, RepoResult};
use reaction_core::value_objects::{EntityId, ReactableRef, ReactionKind};

use crate::mappers::{CounterDelta, TargetKey};
use crate::models::{ReactUpsertModel, ReactionCounterModel, ReactionModel, RemovedReactionModel};

use super::error::{map_db_error, map_write_error};

/// PostgreSQL implementation of ReactionRepository
#[derive(Clone)]
pub struct PgReactionRepository {
    pool: PgPool,
}

impl PgReactionRepository {
    /// Create a new PgReactionRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Apply a counter delta inside an open transaction
///
/// Increments upsert the row (lazy creation); pure decrements only touch an
/// existing row. Both clamp at zero.
async fn apply_counter_delta(
    conn: &mut PgConnection,
    key: &TargetKey<'_>,
    delta: CounterDelta,
) -> RepoResult<()> {
    if delta.is_zero() {
        return Ok(());
    }

    let sql = if delta.is_decrement_only() {
        r#"
        UPDATE reaction_counters
        SET like_count = GREATEST(like_count + $3, 0),
            dislike_count = GREATEST(dislike_count + $4, 0)
        WHERE reactable_type = $1 AND reactable_id = $2
        "#
    } else {
        r#"
        INSERT INTO reaction_counters (reactable_type, reactable_id, like_count, dislike_count)
        VALUES ($1, $2, GREATEST($3, 0), GREATEST($4, 0))
        ON CONFLICT (reactable_type, reactable_id) DO UPDATE
        SET like_count = GREATEST(reaction_counters.like_count + $3, 0),
            dislike_count = GREATEST(reaction_counters.dislike_count + $4, 0)
        "#
    };

    sqlx::query(sql)
        .bind(key.reactable_type)
        .bind(key.reactable_id)
        .bind(delta.likes)
        .bind(delta.dislikes)
        .execute(conn)
        .await
        .map_err(map_write_error)?;

    Ok(())
}

#[async_trait]
impl ReactionRepository for PgReactionRepository {
    #[instrument(skip(self))]
    async fn find(&self, target: &ReactableRef, user_id: EntityId) -> RepoResult<Option<Reaction>> {
        let key = TargetKey::new(target);
        let result = sqlx::query_as::<_, ReactionModel>(
            r#"
            SELECT id, reactable_type, reactable_id, user_id, response, created_at, updated_at
            FROM reactions
            WHERE reactable_type = $1 AND reactable_id = $2 AND user_id = $3
            "#,
        )
        .bind(key.reactable_type)
        .bind(key.reactable_id)
        .bind(user_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Reaction::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn react(
        &self,
        target: &ReactableRef,
        user_id: EntityId,
        kind: ReactionKind,
    ) -> RepoResult<ReactOutcome> {
        let key = TargetKey::new(target);
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        // No row back means the user already holds `kind`
        let upsert = sqlx::query_as::<_, ReactUpsertModel>(
            r#"
            INSERT INTO reactions (reactable_type, reactable_id, user_id, response)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (reactable_type, reactable_id, user_id) DO UPDATE
            SET response = EXCLUDED.response, updated_at = NOW()
            WHERE reactions.response <> EXCLUDED.response
            RETURNING (xmax = 0) AS inserted
            "#,
        )
        .bind(key.reactable_type)
        .bind(key.reactable_id)
        .bind(user_id.into_inner())
        .bind(kind.as_str())
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_write_error)?;

        let outcome = match upsert {
            None => ReactOutcome::Unchanged,
            Some(row) if row.inserted => ReactOutcome::Created,
            Some(_) => ReactOutcome::Switched {
                from: kind.opposite(),
            },
        };

        apply_counter_delta(&mut *tx, &key, CounterDelta::from_outcome(outcome, kind)).await?;

        tx.commit().await.map_err(map_db_error)?;

        debug!(?outcome, "React applied");
        Ok(outcome)
    }

    #[instrument(skip(self))]
    async fn undo(&self, target: &ReactableRef, user_id: EntityId, kind: ReactionKind) -> RepoResult<bool> {
        let key = TargetKey::new(target);
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let removed = sqlx::query_scalar::<_, i64>(
            r#"
            DELETE FROM reactions
            WHERE reactable_type = $1 AND reactable_id = $2 AND user_id = $3 AND response = $4
            RETURNING id
            "#,
        )
        .bind(key.reactable_type)
        .bind(key.reactable_id)
        .bind(user_id.into_inner())
        .bind(kind.as_str())
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_db_error)?;

        if removed.is_some() {
            apply_counter_delta(&mut *tx, &key, CounterDelta::of(kind, -1)).await?;
        }

        tx.commit().await.map_err(map_db_error)?;

        Ok(removed.is_some())
    }

    #[instrument(skip(self))]
    async fn count_matching(&self, target: &ReactableRef, filter: &ReactionFilter) -> RepoResult<u64> {
        let key = TargetKey::new(target);
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM reactions
            WHERE reactable_type = $1
              AND reactable_id = $2
              AND response = ANY($3)
              AND ($4::BIGINT IS NULL OR user_id = $4)
            "#,
        )
        .bind(key.reactable_type)
        .bind(key.reactable_id)
        .bind(filter.kind_strs())
        .bind(filter.user_id.map(EntityId::into_inner))
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(u64::try_from(count).unwrap_or(0))
    }

    #[instrument(skip(self))]
    async fn counter(&self, target: &ReactableRef) -> RepoResult<Option<ReactionCounter>> {
        let key = TargetKey::new(target);
        let result = sqlx::query_as::<_, ReactionCounterModel>(
            r#"
            SELECT id, reactable_type, reactable_id, like_count, dislike_count
            FROM reaction_counters
            WHERE reactable_type = $1 AND reactable_id = $2
            "#,
        )
        .bind(key.reactable_type)
        .bind(key.reactable_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(ReactionCounter::from))
    }

    #[instrument(skip(self))]
    async fn find_by_user(&self, user_id: EntityId, kind: Option<ReactionKind>) -> RepoResult<Vec<Reaction>> {
        let results = sqlx::query_as::<_, ReactionModel>(
            r#"
            SELECT id, reactable_type, reactable_id, user_id, response, created_at, updated_at
            FROM reactions
            WHERE user_id = $1 AND ($2::VARCHAR IS NULL OR response = $2)
            ORDER BY created_at, id
            "#,
        )
        .bind(user_id.into_inner())
        .bind(kind.map(ReactionKind::as_str))
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        results.into_iter().map(Reaction::try_from).collect()
    }

    #[instrument(skip(self))]
    async fn find_users_by_kind(
        &self,
        target: &ReactableRef,
        kind: ReactionKind,
        limit: i64,
    ) -> RepoResult<Vec<EntityId>> {
        let limit = limit.clamp(0, 100);
        let key = TargetKey::new(target);

        let results = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT user_id
            FROM reactions
            WHERE reactable_type = $1 AND reactable_id = $2 AND response = $3
            ORDER BY created_at, id
            LIMIT $4
            "#,
        )
        .bind(key.reactable_type)
        .bind(key.reactable_id)
        .bind(kind.as_str())
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(EntityId::new).collect())
    }

    #[instrument(skip(self))]
    async fn delete_for_reactable(&self, target: &ReactableRef) -> RepoResult<u64> {
        let key = TargetKey::new(target);
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let removed = sqlx::query(
            r#"
            DELETE FROM reactions WHERE reactable_type = $1 AND reactable_id = $2
            "#,
        )
        .bind(key.reactable_type)
        .bind(key.reactable_id)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?
        .rows_affected();

        sqlx::query(
            r#"
            DELETE FROM reaction_counters WHERE reactable_type = $1 AND reactable_id = $2
            "#,
        )
        .bind(key.reactable_type)
        .bind(key.reactable_id)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;

        Ok(removed)
    }

    #[instrument(skip(self))]
    async fn delete_for_user(&self, user_id: EntityId) -> RepoResult<u64> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let removed = sqlx::query_as::<_, RemovedReactionModel>(
            r#"
            DELETE FROM reactions WHERE user_id = $1
            RETURNING reactable_type, reactable_id, response
            "#,
        )
        .bind(user_id.into_inner())
        .fetch_all(&mut *tx)
        .await
        .map_err(map_db_error)?;

        let mut deltas: BTreeMap<(String, i64), CounterDelta> = BTreeMap::new();
        for row in &removed {
            let kind: ReactionKind = row.response.parse()?;
            deltas
                .entry((row.reactable_type.clone(), row.reactable_id))
                .or_default()
                .add(kind, -1);
        }

        for ((reactable_type, reactable_id), delta) in &deltas {
            let key = TargetKey {
                reactable_type: reactable_type.as_str(),
                reactable_id: *reactable_id,
            };
            apply_counter_delta(&mut *tx, &key, *delta).await?;
        }

        tx.commit().await.map_err(map_db_error)?;

        Ok(removed.len() as u64)
    }
}
