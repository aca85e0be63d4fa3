//! WebSocket adapters for real-time lock synchronization.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                 SessionLifecycle                         │
//! │   startEditing / heartbeat / stopEditing / sweep         │
//! └─────────────────────────────────────────────────────────┘
//!                          │ publishes SessionEvent
//!                          ▼
//! ┌─────────────────────────────────────────────────────────┐
//! │                   BroadcastHub                           │
//! │   one process-wide stream, every client subscribed       │
//! └─────────────────────────────────────────────────────────┘
//!                          │ fan-out (origin skipped)
//!                          ▼
//!            client-a    client-b    client-c
//! ```
//!
//! # Components
//!
//! - [`messages`] - wire protocol types
//! - [`hub`] - process-wide broadcast fan-out
//! - [`handler`] - axum upgrade handler and per-connection loop

pub mod handler;
pub mod hub;
pub mod messages;

pub use handler::{websocket_routes, ws_handler, WebSocketState};
pub use hub::{BroadcastEnvelope, BroadcastHub};
pub use messages::{snapshot_message, ClientMessage, ServerMessage, SessionPayload};
