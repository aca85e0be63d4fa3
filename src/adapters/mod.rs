//! Adapters - transport implementations over the domain and ports.
//!
//! - `websocket` - real-time lock synchronization (the primary interface)
//! - `http` - snapshot re-fetch and health probe

pub mod http;
pub mod websocket;
