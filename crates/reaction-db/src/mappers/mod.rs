//! Entity to model mappers
//!
//! This module provides conversions between domain entities (reaction-core) and database models.
//! - `From<Model>`/`TryFrom<Model> for Entity`: Convert database rows to domain objects
//! - `TargetKey` / `CounterDelta`: Prepare entity data for database operations

mod reaction;

pub use reaction::{CounterDelta, TargetKey};
