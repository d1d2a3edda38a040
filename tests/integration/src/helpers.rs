//! Test helpers for running the services against PostgreSQL

use std::sync::Arc;

use anyhow::Result;
use reaction_common::AppConfig;
use reaction_db::{create_pool, run_migrations, DatabaseConfig, PgPool, PgReactionRepository};
use reaction_service::ServiceContext;

use crate::fixtures::Member;

/// Load the application config from `.env` and the environment
pub fn test_config() -> Result<AppConfig> {
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env().map_err(|e| anyhow::anyhow!("Config error: {}", e))?;

    Ok(config)
}

/// Helper to check if test environment is available
pub fn check_test_env() -> bool {
    dotenvy::dotenv().ok();

    if std::env::var("DATABASE_URL").is_err() {
        eprintln!("Skipping test: DATABASE_URL not set");
        return false;
    }

    true
}

/// Services wired to a migrated PostgreSQL database
pub struct TestDatabase {
    pub pool: PgPool,
    pub ctx: ServiceContext,
}

impl TestDatabase {
    /// Connect, provide a minimal host `users` table, and run migrations
    pub async fn start() -> Result<Self> {
        let config = test_config()?;
        let mut db_config = DatabaseConfig::from(&config.database);
        db_config.run_migrations = false;

        let pool = create_pool(&db_config).await?;
        ensure_users_table(&pool).await?;
        run_migrations(&pool).await?;

        let ctx = ServiceContext::new(Arc::new(PgReactionRepository::new(pool.clone())));
        Ok(Self { pool, ctx })
    }

    /// Insert the member into the host `users` table
    pub async fn insert_member(&self, member: &Member) -> Result<()> {
        sqlx::query("INSERT INTO users (id) VALUES ($1)")
            .bind(member.id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Delete the member row; the foreign key cascade removes leftover reactions
    pub async fn delete_member(&self, member: &Member) -> Result<()> {
        sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(member.id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

/// The reactions table references `users(id)`
pub async fn ensure_users_table(pool: &PgPool) -> Result<()> {
    sqlx::query("CREATE TABLE IF NOT EXISTS users (id BIGINT PRIMARY KEY)")
        .execute(pool)
        .await?;
    Ok(())
}
