//! Pressroom - Real-time editing session lock service
//!
//! Prevents two editors from concurrently editing the same article:
//! a process-wide registry maps each article to its single active
//! editing session, deltas are broadcast over WebSocket, and stale
//! sessions expire via heartbeats and a periodic sweep.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
