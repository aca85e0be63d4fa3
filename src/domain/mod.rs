//! Domain layer containing the lock service's business logic.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, timestamps)
//! - `session` - Editing sessions: the registry, lock errors, events, and
//!   the lockout presentation resolver

pub mod foundation;
pub mod session;
