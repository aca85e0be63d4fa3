//! Integration tests for the editing session lock.
//!
//! Exercises the full stack below the socket: lifecycle controller,
//! registry, and broadcast hub wired together the way `main` wires them,
//! plus the HTTP snapshot route through the axum router.

use std::sync::Arc;

use chrono::Duration;
use tokio::time::timeout;

use pressroom::adapters::http::{http_routes, HttpState};
use pressroom::adapters::websocket::{BroadcastHub, ServerMessage};
use pressroom::application::SessionLifecycle;
use pressroom::domain::foundation::{
    ArticleId, ChannelId, ConnectionId, Editor, Timestamp, UserId,
};
use pressroom::domain::session::{resolve, LockError, LockoutView, SessionRegistry};

const TIMEOUT_SECS: i64 = 600;

fn editor(id: &str) -> Editor {
    Editor::new(
        UserId::new(id).unwrap(),
        format!("Editor {}", id),
        format!("{}@example.com", id),
    )
}

fn article(id: &str) -> ArticleId {
    ArticleId::new(id).unwrap()
}

fn channel() -> ChannelId {
    ChannelId::new("editorial").unwrap()
}

fn stack() -> (Arc<SessionLifecycle>, Arc<BroadcastHub>, Arc<SessionRegistry>) {
    let registry = Arc::new(SessionRegistry::new(Duration::seconds(TIMEOUT_SECS)));
    let hub = Arc::new(BroadcastHub::with_default_capacity());
    let lifecycle = Arc::new(SessionLifecycle::new(registry.clone(), hub.clone()));
    (lifecycle, hub, registry)
}

async fn next_message(
    rx: &mut tokio::sync::broadcast::Receiver<pressroom::adapters::websocket::BroadcastEnvelope>,
) -> ServerMessage {
    timeout(std::time::Duration::from_secs(1), rx.recv())
        .await
        .expect("no broadcast within 1s")
        .expect("broadcast channel closed")
        .message
}

// ─────────────────────────────────────────────────────────────────────────
// The end-to-end lockout scenario
// ─────────────────────────────────────────────────────────────────────────

/// User A locks "123"; B is denied; A goes silent; the sweep expires the
/// session and broadcasts the release; B retries and wins the lock.
#[tokio::test]
async fn lock_deny_expire_retry_scenario() {
    let (lifecycle, hub, _registry) = stack();
    let mut observer = hub.join(ConnectionId::new()).await;

    // t=0: A starts editing
    lifecycle
        .start_editing(article("123"), editor("a"), channel(), ConnectionId::new())
        .await
        .expect("A should acquire the lock");

    match next_message(&mut observer).await {
        ServerMessage::UserStartedEditing(payload) => {
            assert_eq!(payload.article, "123");
            assert_eq!(payload.user.id.as_str(), "a");
        }
        other => panic!("expected started broadcast, got {:?}", other),
    }

    // t=5: B is denied with the holder's identity
    let err = lifecycle
        .start_editing(article("123"), editor("b"), channel(), ConnectionId::new())
        .await
        .unwrap_err();
    match err {
        LockError::AlreadyLocked { holder, .. } => assert_eq!(holder.id.as_str(), "a"),
        other => panic!("expected AlreadyLocked, got {:?}", other),
    }

    // A never heartbeats; at t=timeout+1 the sweep removes the session
    let removed = lifecycle
        .sweep(Timestamp::now().plus_secs(TIMEOUT_SECS as u64 + 1))
        .await;
    assert_eq!(removed, 1);

    match next_message(&mut observer).await {
        ServerMessage::UserStoppedEditing { article } => assert_eq!(article, "123"),
        other => panic!("expected stopped broadcast, got {:?}", other),
    }

    // B retries and succeeds
    lifecycle
        .start_editing(article("123"), editor("b"), channel(), ConnectionId::new())
        .await
        .expect("B should acquire the lock after expiry");
}

#[tokio::test]
async fn heartbeat_keeps_the_lock_alive_through_sweeps() {
    let (lifecycle, _hub, registry) = stack();
    lifecycle
        .start_editing(article("123"), editor("a"), channel(), ConnectionId::new())
        .await
        .unwrap();

    let a = UserId::new("a").unwrap();
    lifecycle.heartbeat(&article("123"), &a).await.unwrap();

    // A sweep at half the timeout removes nothing
    let removed = lifecycle
        .sweep(Timestamp::now().plus_secs(TIMEOUT_SECS as u64 / 2))
        .await;
    assert_eq!(removed, 0);
    assert!(registry.get(&article("123")).is_some());
}

#[tokio::test]
async fn disconnect_releases_locks_and_broadcasts_to_everyone() {
    let (lifecycle, hub, registry) = stack();
    let conn_a = ConnectionId::new();
    let mut observer = hub.join(ConnectionId::new()).await;

    lifecycle
        .start_editing(article("123"), editor("a"), channel(), conn_a)
        .await
        .unwrap();
    lifecycle
        .start_editing(article("456"), editor("a"), channel(), conn_a)
        .await
        .unwrap();
    // Drain the two started broadcasts
    next_message(&mut observer).await;
    next_message(&mut observer).await;

    lifecycle.on_disconnect(&conn_a).await;

    assert!(registry.is_empty());
    for _ in 0..2 {
        let msg = next_message(&mut observer).await;
        assert!(matches!(msg, ServerMessage::UserStoppedEditing { .. }));
    }
}

#[tokio::test]
async fn resolver_agrees_with_registry_state() {
    let (lifecycle, _hub, registry) = stack();
    let timeout = Duration::seconds(TIMEOUT_SECS);
    let a = UserId::new("a").unwrap();
    let b = UserId::new("b").unwrap();

    // Unlocked article is editable for everyone
    let now = Timestamp::now();
    assert_eq!(
        resolve(registry.get(&article("123")).as_ref(), &b, now, timeout),
        LockoutView::Editable
    );

    lifecycle
        .start_editing(article("123"), editor("a"), channel(), ConnectionId::new())
        .await
        .unwrap();

    let session = registry.get(&article("123"));
    assert_eq!(
        resolve(session.as_ref(), &a, now, timeout),
        LockoutView::Editable
    );
    assert!(matches!(
        resolve(session.as_ref(), &b, now, timeout),
        LockoutView::LockedByOther(_)
    ));

    // Past expiry the owner sees TimedOut, never Editable
    let late = now.plus_secs(TIMEOUT_SECS as u64 + 1);
    assert_eq!(
        resolve(session.as_ref(), &a, late, timeout),
        LockoutView::TimedOut
    );
}

// ─────────────────────────────────────────────────────────────────────────
// HTTP snapshot route
// ─────────────────────────────────────────────────────────────────────────

mod http_snapshot {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    #[tokio::test]
    async fn sessions_endpoint_returns_registry_snapshot() {
        let (lifecycle, _hub, registry) = stack();
        lifecycle
            .start_editing(article("123"), editor("a"), channel(), ConnectionId::new())
            .await
            .unwrap();

        let app = http_routes(HttpState::new(registry));
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/sessions")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["sessions"]["123"]["user"]["id"], "a");
    }

    #[tokio::test]
    async fn health_endpoint_reports_ok() {
        let (_lifecycle, _hub, registry) = stack();
        let app = http_routes(HttpState::new(registry));

        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }
}
