//! Service context - dependency container for services

use std::fmt;
use std::sync::Arc;

use reaction_common::AppConfig;
use reaction_core::traits::ReactionRepository;
use reaction_db::repositories::map_db_error;
use reaction_db::{create_pool, DatabaseConfig, InMemoryReactionRepository, PgReactionRepository};
use tracing::info;

use super::error::{ServiceError, ServiceResult};

/// Service context containing the reaction repository
#[derive(Clone)]
pub struct ServiceContext {
    reaction_repo: Arc<dyn ReactionRepository>,
}

impl ServiceContext {
    /// Create a new service context over any repository implementation
    pub fn new(reaction_repo: Arc<dyn ReactionRepository>) -> Self {
        Self { reaction_repo }
    }

    /// Context backed by a fresh in-memory store
    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryReactionRepository::new()))
    }

    /// Connect to PostgreSQL using the application config
    ///
    /// Migrations run when `database.run_migrations` is set.
    pub async fn connect(config: &AppConfig) -> ServiceResult<Self> {
        let db_config = DatabaseConfig::from(&config.database);
        let pool = create_pool(&db_config).await.map_err(map_db_error)?;

        info!(app = %config.app.name, "Reaction services ready");

        Ok(Self::new(Arc::new(PgReactionRepository::new(pool))))
    }

    /// Get the reaction repository
    pub fn reaction_repo(&self) -> &dyn ReactionRepository {
        self.reaction_repo.as_ref()
    }
}

impl fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceContext")
            .field("reaction_repo", &"dyn ReactionRepository")
            .finish()
    }
}

/// Builder for creating ServiceContext
#[derive(Default)]
pub struct ServiceContextBuilder {
    reaction_repo: Option<Arc<dyn ReactionRepository>>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reaction_repo(mut self, repo: Arc<dyn ReactionRepository>) -> Self {
        self.reaction_repo = Some(repo);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if the repository is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        let reaction_repo = self
            .reaction_repo
            .ok_or_else(|| ServiceError::validation("reaction_repo is required"))?;
        Ok(ServiceContext::new(reaction_repo))
    }
}
