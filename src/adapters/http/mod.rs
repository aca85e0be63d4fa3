//! HTTP adapter: the snapshot endpoint clients use on reconnect, plus a
//! liveness probe.

mod dto;
mod handlers;
mod routes;

pub use dto::SessionsResponse;
pub use handlers::{get_sessions, health, HttpState};
pub use routes::http_routes;
