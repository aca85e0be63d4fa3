//! Editing session entity.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ArticleId, ChannelId, ConnectionId, Editor, Timestamp, UserId};

/// One editor's active claim on one article.
///
/// # Invariants
///
/// - At most one non-expired session exists per article (enforced by the
///   registry, not by this type).
/// - `last_heartbeat_at >= started_at`.
///
/// A session is expired once its heartbeat age exceeds the configured
/// timeout; expired sessions are treated as absent by the registry and
/// removed by the periodic sweep.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditSession {
    /// Article this session claims.
    article: ArticleId,

    /// Editor holding the claim.
    editor: Editor,

    /// Editorial channel the edit happens under.
    channel: ChannelId,

    /// WebSocket connection that opened the session.
    ///
    /// Used to release the lock when the connection drops.
    connection: ConnectionId,

    /// When the session began.
    started_at: Timestamp,

    /// Last liveness signal from the editor.
    last_heartbeat_at: Timestamp,
}

impl EditSession {
    /// Creates a new session starting now (per the supplied clock).
    pub fn new(
        article: ArticleId,
        editor: Editor,
        channel: ChannelId,
        connection: ConnectionId,
        now: Timestamp,
    ) -> Self {
        Self {
            article,
            editor,
            channel,
            connection,
            started_at: now,
            last_heartbeat_at: now,
        }
    }

    /// Returns the claimed article.
    pub fn article(&self) -> &ArticleId {
        &self.article
    }

    /// Returns the editor holding the claim.
    pub fn editor(&self) -> &Editor {
        &self.editor
    }

    /// Returns the editorial channel.
    pub fn channel(&self) -> &ChannelId {
        &self.channel
    }

    /// Returns the owning connection.
    pub fn connection(&self) -> &ConnectionId {
        &self.connection
    }

    /// Returns when the session began.
    pub fn started_at(&self) -> Timestamp {
        self.started_at
    }

    /// Returns the last heartbeat time.
    pub fn last_heartbeat_at(&self) -> Timestamp {
        self.last_heartbeat_at
    }

    /// Checks whether the session is held by the given user.
    pub fn is_held_by(&self, user: &UserId) -> bool {
        &self.editor.id == user
    }

    /// Checks whether the heartbeat age exceeds the timeout.
    pub fn is_expired(&self, now: Timestamp, timeout: chrono::Duration) -> bool {
        now.duration_since(&self.last_heartbeat_at) > timeout
    }

    /// Refreshes the heartbeat clock.
    pub fn touch(&mut self, now: Timestamp) {
        self.last_heartbeat_at = now;
    }
}
