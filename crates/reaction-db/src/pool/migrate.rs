//! Schema migrations for the reactions tables
//!
//! The SQL files are compiled into the crate, so a deployed binary needs no
//! source tree. Run them after the host's own migrations, which must create
//! `users`.

use std::borrow::Cow;
use std::future::Future;
use std::path::Path;
use std::pin::Pin;

use sqlx::error::BoxDynError;
use sqlx::migrate::{MigrateError, Migration, MigrationSource, MigrationType, Migrator};
use sqlx::postgres::PgPool;
use tracing::info;

/// Bundled migrations as `(version, description, sql)`
const BUNDLED: [(i64, &str, &str); 2] = [
    (
        20_240_101_000_001,
        "create reactions",
        include_str!("../../migrations/20240101000001_create_reactions.sql"),
    ),
    (
        20_240_101_000_002,
        "create reaction counters",
        include_str!("../../migrations/20240101000002_create_reaction_counters.sql"),
    ),
];

/// Migration source backed by the SQL embedded at compile time
#[derive(Debug, Clone, Copy, Default)]
pub struct BundledMigrations;

impl BundledMigrations {
    /// The bundled migrations in version order
    pub fn migrations() -> Vec<Migration> {
        BUNDLED
            .iter()
            .map(|&(version, description, sql)| {
                Migration::new(
                    version,
                    Cow::Borrowed(description),
                    MigrationType::Simple,
                    Cow::Borrowed(sql),
                    false,
                )
            })
            .collect()
    }
}

impl<'s> MigrationSource<'s> for BundledMigrations {
    fn resolve(self) -> Pin<Box<dyn Future<Output = Result<Vec<Migration>, BoxDynError>> + Send + 's>> {
        Box::pin(async { Ok(Self::migrations()) })
    }
}

/// Apply the bundled migrations
pub async fn run_migrations(pool: &PgPool) -> Result<(), MigrateError> {
    let migrator = Migrator::new(BundledMigrations).await?;
    migrator.run(pool).await?;

    info!(count = migrator.iter().count(), "Bundled migrations applied");
    Ok(())
}

/// Apply migrations from a directory on disk
pub async fn run_migrations_from(pool: &PgPool, dir: &Path) -> Result<(), MigrateError> {
    let migrator = Migrator::new(dir).await?;
    migrator.run(pool).await?;

    info!(
        dir = %dir.display(),
        count = migrator.iter().count(),
        "Migrations applied"
    );
    Ok(())
}
