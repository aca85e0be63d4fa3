//! WebSocket message types for the lock protocol.
//!
//! Defines the protocol between server and connected clients:
//! - Client → Server: snapshot requests, start/heartbeat/stop commands
//! - Server → Client: handshake, snapshot, lock deltas, denials, errors
//!
//! Event names are carried over from the original socket protocol so
//! existing CMS clients keep working unchanged.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ConnectionId, Editor};
use crate::domain::session::{EditSession, SessionEvent};

// ============================================
// Client → Server Messages
// ============================================

/// All message types that can be received from a client.
///
/// Identifier fields arrive as raw strings and are validated by the
/// connection handler before reaching the lifecycle controller.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ClientMessage {
    /// Request the full registry snapshot (on connect or reconnect).
    ArticlesRequested,

    /// Claim an article for editing.
    #[serde(rename_all = "camelCase")]
    UserStartedEditing {
        user: Editor,
        article: String,
        channel: String,
    },

    /// Heartbeat refreshing the claim's expiry clock.
    #[serde(rename_all = "camelCase")]
    UserCurrentlyEditing { article: String, user: String },

    /// Release the claim.
    #[serde(rename_all = "camelCase")]
    UserStoppedEditing { article: String, user: String },
}

// ============================================
// Server → Client Messages
// ============================================

/// All message types that can be sent to a client.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ServerMessage {
    /// Connection established; carries the server-assigned connection id.
    #[serde(rename_all = "camelCase")]
    Connected {
        connection_id: ConnectionId,
        timestamp: String,
    },

    /// Full snapshot of live sessions, keyed by article id.
    #[serde(rename_all = "camelCase")]
    EditedArticlesReceived {
        sessions: BTreeMap<String, SessionPayload>,
    },

    /// An article was claimed.
    UserStartedEditing(SessionPayload),

    /// An article's claim was released (stop, disconnect, or expiry).
    #[serde(rename_all = "camelCase")]
    UserStoppedEditing { article: String },

    /// Direct reply when a claim is refused because another editor holds it.
    #[serde(rename_all = "camelCase")]
    EditingDenied { article: String, holder: Editor },

    /// Direct reply on invalid input or lost ownership.
    #[serde(rename_all = "camelCase")]
    Error { code: String, message: String },
}

impl ServerMessage {
    /// Maps a registry delta onto its broadcast message.
    pub fn from_event(event: &SessionEvent) -> Self {
        match event {
            SessionEvent::Started(session) => {
                ServerMessage::UserStartedEditing(SessionPayload::from(session))
            }
            SessionEvent::Stopped { article, .. } => ServerMessage::UserStoppedEditing {
                article: article.to_string(),
            },
        }
    }
}

/// Wire representation of one editing session.
///
/// The owning connection id is deliberately not exposed.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionPayload {
    pub article: String,
    pub user: Editor,
    pub channel: String,
    pub started_at: String,
    pub last_heartbeat_at: String,
}

impl From<&EditSession> for SessionPayload {
    fn from(session: &EditSession) -> Self {
        Self {
            article: session.article().to_string(),
            user: session.editor().clone(),
            channel: session.channel().to_string(),
            started_at: session.started_at().to_rfc3339(),
            last_heartbeat_at: session.last_heartbeat_at().to_rfc3339(),
        }
    }
}

/// Builds the snapshot message from live sessions.
pub fn snapshot_message(sessions: &[EditSession]) -> ServerMessage {
    ServerMessage::EditedArticlesReceived {
        sessions: sessions
            .iter()
            .map(|s| (s.article().to_string(), SessionPayload::from(s)))
            .collect(),
    }
}
