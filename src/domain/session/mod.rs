//! Editing session domain: registry, lock errors, events, and the
//! lockout presentation resolver.

mod errors;
mod events;
mod lockout;
mod registry;
mod session;

pub use errors::LockError;
pub use events::{SessionEvent, StopReason};
pub use lockout::{resolve, LockoutView};
pub use registry::SessionRegistry;
pub use session::EditSession;
