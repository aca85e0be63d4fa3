//! WebSocket upgrade handler and per-connection loop.
//!
//! Each connection gets a server-assigned id on upgrade and then runs a
//! single task that multiplexes two streams:
//! 1. Inbound client messages, translated into lifecycle calls with a
//!    direct reply for the outcome
//! 2. Hub broadcasts, forwarded to the client unless it originated them
//!
//! When either stream ends, every session the connection holds is
//! released via `on_disconnect` before the task exits.

use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::Response,
};
use futures::{SinkExt, StreamExt};
use tokio::sync::broadcast;

use crate::application::SessionLifecycle;
use crate::domain::foundation::{ArticleId, ChannelId, ConnectionId, Timestamp, UserId};
use crate::domain::session::LockError;

use super::hub::BroadcastHub;
use super::messages::{snapshot_message, ClientMessage, ServerMessage, SessionPayload};

/// State required for WebSocket handling.
#[derive(Clone)]
pub struct WebSocketState {
    pub hub: Arc<BroadcastHub>,
    pub lifecycle: Arc<SessionLifecycle>,
}

impl WebSocketState {
    /// Creates a new WebSocket state.
    pub fn new(hub: Arc<BroadcastHub>, lifecycle: Arc<SessionLifecycle>) -> Self {
        Self { hub, lifecycle }
    }
}

/// Handles WebSocket upgrade requests.
///
/// Route: `GET /ws`
pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<WebSocketState>) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Runs an established connection until it closes.
async fn handle_socket(socket: WebSocket, state: WebSocketState) {
    let (mut sender, mut receiver) = socket.split();

    let connection = ConnectionId::new();
    let mut hub_rx = state.hub.join(connection).await;

    tracing::debug!(connection_id = %connection, "client connected");

    let connected = ServerMessage::Connected {
        connection_id: connection,
        timestamp: Timestamp::now().to_rfc3339(),
    };
    if send_message(&mut sender, &connected).await.is_err() {
        // Client disconnected immediately
        state.hub.leave(&connection).await;
        return;
    }

    loop {
        tokio::select! {
            incoming = receiver.next() => {
                match incoming {
                    Some(Ok(Message::Text(text))) => {
                        if let Some(reply) = handle_client_text(&text, connection, &state).await {
                            if send_message(&mut sender, &reply).await.is_err() {
                                break;
                            }
                        }
                    }
                    Some(Ok(Message::Close(_))) | None => {
                        tracing::debug!(connection_id = %connection, "client closed connection");
                        break;
                    }
                    // Protocol pings/pongs are answered by axum; binary is ignored
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        tracing::debug!(connection_id = %connection, "receive error: {}", e);
                        break;
                    }
                }
            }
            envelope = hub_rx.recv() => {
                match envelope {
                    Ok(envelope) => {
                        // The originator already got a direct reply
                        if envelope.origin == Some(connection) {
                            continue;
                        }
                        if send_message(&mut sender, &envelope.message).await.is_err() {
                            break;
                        }
                    }
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        // Missed deltas are recovered via snapshot re-fetch
                        tracing::warn!(
                            connection_id = %connection,
                            skipped,
                            "client fell behind the broadcast stream"
                        );
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        }
    }

    state.lifecycle.on_disconnect(&connection).await;
    state.hub.leave(&connection).await;
    tracing::debug!(connection_id = %connection, "client disconnected");
}

/// Dispatches one inbound text frame; returns the direct reply, if any.
async fn handle_client_text(
    text: &str,
    connection: ConnectionId,
    state: &WebSocketState,
) -> Option<ServerMessage> {
    let message: ClientMessage = match serde_json::from_str(text) {
        Ok(message) => message,
        Err(e) => {
            tracing::debug!(connection_id = %connection, "malformed message: {}", e);
            return Some(invalid_message(e.to_string()));
        }
    };

    match message {
        ClientMessage::ArticlesRequested => {
            let sessions = state.lifecycle.registry().snapshot(Timestamp::now());
            Some(snapshot_message(&sessions))
        }

        ClientMessage::UserStartedEditing { user, article, channel } => {
            let article = match article.parse::<ArticleId>() {
                Ok(id) => id,
                Err(e) => return Some(invalid_message(e.to_string())),
            };
            let channel = match ChannelId::new(channel) {
                Ok(id) => id,
                Err(e) => return Some(invalid_message(e.to_string())),
            };

            match state
                .lifecycle
                .start_editing(article, user, channel, connection)
                .await
            {
                Ok(session) => Some(ServerMessage::UserStartedEditing(SessionPayload::from(
                    &session,
                ))),
                Err(err) => Some(lock_error_reply(err)),
            }
        }

        ClientMessage::UserCurrentlyEditing { article, user } => {
            let (article, user) = match parse_ids(&article, &user) {
                Ok(ids) => ids,
                Err(reply) => return Some(reply),
            };

            match state.lifecycle.heartbeat(&article, &user).await {
                Ok(()) => None,
                Err(err) => Some(lock_error_reply(err)),
            }
        }

        ClientMessage::UserStoppedEditing { article, user } => {
            let (article, user) = match parse_ids(&article, &user) {
                Ok(ids) => ids,
                Err(reply) => return Some(reply),
            };

            match state
                .lifecycle
                .stop_editing(&article, &user, Some(connection))
                .await
            {
                Ok(()) => Some(ServerMessage::UserStoppedEditing {
                    article: article.to_string(),
                }),
                Err(err) => Some(lock_error_reply(err)),
            }
        }
    }
}

fn parse_ids(article: &str, user: &str) -> Result<(ArticleId, UserId), ServerMessage> {
    let article = article
        .parse::<ArticleId>()
        .map_err(|e| invalid_message(e.to_string()))?;
    let user = user
        .parse::<UserId>()
        .map_err(|e| invalid_message(e.to_string()))?;
    Ok((article, user))
}

fn invalid_message(detail: String) -> ServerMessage {
    ServerMessage::Error {
        code: "INVALID_MESSAGE".to_string(),
        message: detail,
    }
}

fn lock_error_reply(err: LockError) -> ServerMessage {
    match err {
        LockError::AlreadyLocked { article, holder } => ServerMessage::EditingDenied {
            article: article.to_string(),
            holder,
        },
        err @ LockError::NotOwner { .. } => ServerMessage::Error {
            code: err.code().to_string(),
            message: err.to_string(),
        },
    }
}

/// Sends a JSON message over the WebSocket.
async fn send_message(
    sender: &mut futures::stream::SplitSink<WebSocket, Message>,
    msg: &ServerMessage,
) -> Result<(), axum::Error> {
    let json = serde_json::to_string(msg).expect("ServerMessage serialization should not fail");
    sender.send(Message::Text(json)).await
}

/// Creates the axum router for the WebSocket endpoint.
pub fn websocket_routes(state: WebSocketState) -> axum::Router {
    use axum::routing::get;

    axum::Router::new()
        .route("/ws", get(ws_handler))
        .with_state(state)
}
