//! SessionEventPublisher port - interface for fanning out registry deltas.
//!
//! The lifecycle controller publishes events without knowing the transport;
//! the WebSocket hub implements this port in production and tests supply
//! an in-memory recorder.

use async_trait::async_trait;

use crate::domain::foundation::ConnectionId;
use crate::domain::session::SessionEvent;

/// Port for broadcasting session events to connected clients.
///
/// Delivery is best-effort, at-least-once per currently-connected client.
/// Implementations must never propagate delivery failures back to the
/// caller: a slow or gone subscriber is its own problem, and the registry
/// mutation that produced the event has already committed.
#[async_trait]
pub trait SessionEventPublisher: Send + Sync {
    /// Publish one event.
    ///
    /// `origin` identifies the connection whose request produced the event;
    /// implementations may skip delivering to it since that client already
    /// learned the outcome from its direct reply. Sweep- and disconnect-
    /// driven events carry no origin and reach every client.
    async fn publish(&self, event: SessionEvent, origin: Option<ConnectionId>);
}
