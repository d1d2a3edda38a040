//! Error handling utilities for repositories

use reaction_core::error::DomainError;
use sqlx::Error as SqlxError;

/// Convert SQLx error to DomainError
pub fn map_db_error(e: SqlxError) -> DomainError {
    DomainError::DatabaseError(e.to_string())
}

/// Map constraint violations on reaction writes to domain errors
pub fn map_write_error(e: SqlxError) -> DomainError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            return DomainError::ReactionConflict(db_err.message().to_string());
        }
        if db_err.is_foreign_key_violation() {
            return DomainError::ValidationError(format!(
                "reactor does not exist: {}",
                db_err.message()
            ));
        }
    }
    DomainError::DatabaseError(e.to_string())
}
