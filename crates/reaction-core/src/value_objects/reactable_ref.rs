//! ReactableRef - tagged reference to a polymorphic reaction target

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DomainError;

use super::EntityId;

/// Tagged reference `{reactable_type, reactable_id}` identifying a reactable entity
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ReactableRef {
    pub reactable_type: String,
    pub reactable_id: EntityId,
}

impl ReactableRef {
    /// Maximum length of a type tag (matches the `VARCHAR(255)` column)
    pub const MAX_TYPE_LEN: usize = 255;

    /// Create a reference without validating the type tag
    pub fn new(reactable_type: impl Into<String>, reactable_id: EntityId) -> Self {
        Self {
            reactable_type: reactable_type.into(),
            reactable_id,
        }
    }

    /// Create a reference, rejecting empty or oversized type tags
    pub fn try_new(
        reactable_type: impl Into<String>,
        reactable_id: EntityId,
    ) -> Result<Self, DomainError> {
        let target = Self::new(reactable_type, reactable_id);
        target.validate()?;
        Ok(target)
    }

    /// Check the type tag
    pub fn validate(&self) -> Result<(), DomainError> {
        let tag = self.reactable_type.trim();
        if tag.is_empty() || self.reactable_type.len() > Self::MAX_TYPE_LEN {
            return Err(DomainError::InvalidReactableType(
                self.reactable_type.clone(),
            ));
        }
        Ok(())
    }
}

impl fmt::Display for ReactableRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.reactable_type, self.reactable_id)
    }
}
