//! HTTP handlers for the snapshot and health endpoints.
//!
//! The snapshot route is the reconnect path: a client whose WebSocket
//! dropped re-fetches the full registry state here instead of relying on
//! missed broadcasts.

use std::sync::Arc;

use axum::{extract::State, Json};

use crate::domain::foundation::Timestamp;
use crate::domain::session::SessionRegistry;

use super::dto::SessionsResponse;

/// State required for HTTP handling.
#[derive(Clone)]
pub struct HttpState {
    pub registry: Arc<SessionRegistry>,
}

impl HttpState {
    /// Creates a new HTTP state.
    pub fn new(registry: Arc<SessionRegistry>) -> Self {
        Self { registry }
    }
}

/// GET /api/sessions - snapshot of live editing sessions.
pub async fn get_sessions(State(state): State<HttpState>) -> Json<SessionsResponse> {
    let sessions = state.registry.snapshot(Timestamp::now());
    Json(SessionsResponse::from_sessions(&sessions))
}

/// GET /health - liveness probe.
pub async fn health() -> &'static str {
    "ok"
}
