//! Foundation module - Shared domain primitives.
//!
//! Contains the value objects and identifiers that form the vocabulary
//! of the lock service: opaque article/user/channel ids, server-generated
//! connection ids, editor identity, and UTC timestamps.

mod editor;
mod ids;
mod timestamp;

pub use editor::Editor;
pub use ids::{ArticleId, ChannelId, ConnectionId, EmptyIdError, UserId};
pub use timestamp::Timestamp;
