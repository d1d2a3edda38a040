//! Domain errors - error types for the domain layer

use thiserror::Error;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Invalid reaction kind: {0}")]
    InvalidReactionKind(String),

    #[error("Invalid reactable type: {0:?}")]
    InvalidReactableType(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    // =========================================================================
    // Resolution Errors
    // =========================================================================
    #[error("No loader registered for reactable type: {0}")]
    UnknownReactableType(String),

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Reaction conflict: {0}")]
    ReactionConflict(String),

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Validation
            Self::InvalidReactionKind(_) => "INVALID_REACTION_KIND",
            Self::InvalidReactableType(_) => "INVALID_REACTABLE_TYPE",
            Self::ValidationError(_) => "VALIDATION_ERROR",

            // Resolution
            Self::UnknownReactableType(_) => "UNKNOWN_REACTABLE_TYPE",

            // Conflict
            Self::ReactionConflict(_) => "REACTION_CONFLICT",

            // Infrastructure
            Self::DatabaseError(_) => "DATABASE_ERROR",
        }
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidReactionKind(_) | Self::InvalidReactableType(_) | Self::ValidationError(_)
        )
    }

    /// Check if no loader is registered for the reference's type
    pub fn is_unknown_type(&self) -> bool {
        matches!(self, Self::UnknownReactableType(_))
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::ReactionConflict(_))
    }

    /// Check if this error came from the storage layer
    pub fn is_storage(&self) -> bool {
        matches!(self, Self::DatabaseError(_))
    }
}
