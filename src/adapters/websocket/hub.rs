//! Broadcast hub fanning registry deltas out to every connected client.
//!
//! All clients watch the same article index, so deltas go over one
//! process-wide broadcast channel rather than per-article rooms. The
//! channel preserves emission order, which gives per-article ordering
//! for free; cross-article ordering is not guaranteed and not needed.
//!
//! A slow client only lags its own receiver. If it falls more than the
//! channel capacity behind it misses messages and must re-fetch the
//! snapshot, which is the documented reconnect path anyway.

use std::collections::HashSet;

use tokio::sync::{broadcast, RwLock};

use async_trait::async_trait;

use crate::domain::foundation::ConnectionId;
use crate::domain::session::SessionEvent;
use crate::ports::SessionEventPublisher;

use super::messages::ServerMessage;

/// One fan-out unit: the rendered message plus the originating connection,
/// so receivers can skip echoing a delta back to the client that caused it.
#[derive(Debug, Clone)]
pub struct BroadcastEnvelope {
    pub message: ServerMessage,
    pub origin: Option<ConnectionId>,
}

/// Fan-out hub over all connected WebSocket clients.
pub struct BroadcastHub {
    sender: broadcast::Sender<BroadcastEnvelope>,

    /// Currently connected clients, for monitoring and tests.
    connections: RwLock<HashSet<ConnectionId>>,
}

impl BroadcastHub {
    /// Creates a hub whose channel buffers `capacity` envelopes per receiver.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self {
            sender,
            connections: RwLock::new(HashSet::new()),
        }
    }

    /// Creates a hub with the default capacity (128 envelopes).
    pub fn with_default_capacity() -> Self {
        Self::new(128)
    }

    /// Registers a connection and returns its broadcast receiver.
    pub async fn join(&self, connection: ConnectionId) -> broadcast::Receiver<BroadcastEnvelope> {
        self.connections.write().await.insert(connection);
        self.sender.subscribe()
    }

    /// Removes a connection from the registry of connected clients.
    ///
    /// The receiver itself is dropped by the connection task.
    pub async fn leave(&self, connection: &ConnectionId) {
        self.connections.write().await.remove(connection);
    }

    /// Number of currently connected clients.
    pub async fn client_count(&self) -> usize {
        self.connections.read().await.len()
    }
}

impl Default for BroadcastHub {
    fn default() -> Self {
        Self::with_default_capacity()
    }
}

#[async_trait]
impl SessionEventPublisher for BroadcastHub {
    async fn publish(&self, event: SessionEvent, origin: Option<ConnectionId>) {
        let envelope = BroadcastEnvelope {
            message: ServerMessage::from_event(&event),
            origin,
        };
        // No receivers is fine; send errors carry no other meaning here
        let _ = self.sender.send(envelope);
    }
}
