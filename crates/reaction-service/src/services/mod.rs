//! Reaction services
//!
//! Service layer implementations that validate input, delegate to the
//! repository, and log state changes.

pub mod context;
pub mod error;
pub mod reaction;
pub mod reactor;

pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use reaction::ReactionService;
pub use reactor::ReactorService;
