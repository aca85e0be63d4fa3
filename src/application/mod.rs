//! Application layer - the session lifecycle controller and its sweep task.

mod lifecycle;

pub use lifecycle::SessionLifecycle;
