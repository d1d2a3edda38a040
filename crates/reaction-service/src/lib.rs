//! # reaction-service
//!
//! Application layer exposing the two reaction capabilities:
//!
//! - [`ReactionService`]: what can be done *to* a reactable entity
//!   (like, dislike, undo, toggle, counts, percentages, cascade delete)
//! - [`ReactorService`]: what a user has reacted to, resolved back into
//!   host entities through a [`reaction_core::ReactableRegistry`]
//!
//! Both borrow a [`ServiceContext`] holding the repository.

pub mod services;

pub use services::{
    ReactionService, ReactorService, ServiceContext, ServiceContextBuilder, ServiceError,
    ServiceResult,
};
