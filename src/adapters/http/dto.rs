//! HTTP DTOs for the session snapshot endpoint.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::adapters::websocket::SessionPayload;
use crate::domain::session::EditSession;

/// Snapshot of all live editing sessions, keyed by article id.
///
/// Shares the WebSocket payload shape so clients parse one session
/// representation regardless of transport.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionsResponse {
    pub sessions: BTreeMap<String, SessionPayload>,
}

impl SessionsResponse {
    /// Builds the response from live sessions.
    pub fn from_sessions(sessions: &[EditSession]) -> Self {
        Self {
            sessions: sessions
                .iter()
                .map(|s| (s.article().to_string(), SessionPayload::from(s)))
                .collect(),
        }
    }
}
