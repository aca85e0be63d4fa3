//! Lock-specific error types.
//!
//! Every error here is a per-article, per-user condition the client
//! resolves by showing a locked view or re-acquiring; none is fatal.

use thiserror::Error;

use crate::domain::foundation::{ArticleId, Editor};

/// Errors raised by registry and lifecycle operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LockError {
    /// Another editor holds a live session on the article.
    ///
    /// Recoverable: the client presents a read-only locked view and may
    /// retry once a `userStoppedEditing` broadcast arrives.
    #[error("article {article} is locked by {holder}")]
    AlreadyLocked { article: ArticleId, holder: Editor },

    /// The requesting user does not hold the article's session.
    ///
    /// Raised by heartbeats from stale tabs or stop requests racing an
    /// ownership change; the client should re-acquire or reload.
    #[error("article {article} is not locked by the requesting user")]
    NotOwner { article: ArticleId },
}

impl LockError {
    /// Stable machine-readable code for wire payloads.
    pub fn code(&self) -> &'static str {
        match self {
            LockError::AlreadyLocked { .. } => "ALREADY_LOCKED",
            LockError::NotOwner { .. } => "NOT_OWNER",
        }
    }
}
