//! # reaction-db
//!
//! Storage layer implementing `ReactionRepository` with PostgreSQL via SQLx.
//!
//! ## Overview
//!
//! This crate provides the PostgreSQL implementation of the repository trait
//! defined in `reaction-core`. It handles:
//!
//! - Connection pool management and schema migrations
//! - Database models with SQLx `FromRow` derives
//! - Entity ↔ Model mappers
//! - Transactional record + counter writes
//!
//! An in-memory implementation with the same semantics is included for tests
//! and for hosts that do not persist reactions.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use reaction_common::AppConfig;
//! use reaction_db::pool::{create_pool, DatabaseConfig};
//! use reaction_db::repositories::PgReactionRepository;
//! use reaction_core::{EntityId, ReactableRef, ReactionKind, ReactionRepository};
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = AppConfig::from_env()?;
//!     let pool = create_pool(&DatabaseConfig::from(&config.database)).await?;
//!     let repo = PgReactionRepository::new(pool);
//!
//!     let post = ReactableRef::new("post", EntityId::new(1));
//!     repo.react(&post, EntityId::new(42), ReactionKind::Like).await?;
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use pool::{
    create_pool, run_migrations, run_migrations_from, BundledMigrations, DatabaseConfig, PgPool,
};
pub use repositories::{InMemoryReactionRepository, PgReactionRepository};
