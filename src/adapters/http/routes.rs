//! HTTP routes for the snapshot and health endpoints.

use axum::{routing::get, Router};

use super::handlers::{get_sessions, health, HttpState};

/// Creates the HTTP router with all endpoints.
pub fn http_routes(state: HttpState) -> Router {
    Router::new()
        .route("/api/sessions", get(get_sessions))
        .route("/health", get(health))
        .with_state(state)
}
