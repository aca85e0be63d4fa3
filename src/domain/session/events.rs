//! Session lifecycle events.

use crate::domain::foundation::ArticleId;

use super::EditSession;

/// Why a session was released.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The editor explicitly stopped editing.
    Stopped,
    /// The owning connection dropped.
    Disconnected,
    /// The heartbeat timed out and the sweep removed the session.
    Expired,
}

/// Registry delta broadcast to connected clients.
///
/// Events for the same article are emitted in mutation order; there is no
/// ordering guarantee across articles and no replay log, so reconnecting
/// clients re-fetch the snapshot instead of relying on missed events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// A session was created for an article.
    Started(EditSession),

    /// An article's session was released.
    Stopped {
        article: ArticleId,
        reason: StopReason,
    },
}

impl SessionEvent {
    /// Returns the article the event concerns.
    pub fn article(&self) -> &ArticleId {
        match self {
            SessionEvent::Started(session) => session.article(),
            SessionEvent::Stopped { article, .. } => article,
        }
    }
}
