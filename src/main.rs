//! Pressroom server binary.
//!
//! Wires the registry, lifecycle controller, and broadcast hub together,
//! mounts the WebSocket and HTTP routes, and runs the expiry sweeper for
//! the lifetime of the process.

use std::error::Error;
use std::sync::Arc;

use axum::http::HeaderValue;
use tokio::sync::watch;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use pressroom::adapters::http::{http_routes, HttpState};
use pressroom::adapters::websocket::{websocket_routes, BroadcastHub, WebSocketState};
use pressroom::application::SessionLifecycle;
use pressroom::config::{AppConfig, ServerConfig};
use pressroom::domain::session::SessionRegistry;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level)),
        )
        .init();

    let registry = Arc::new(SessionRegistry::new(config.locking.heartbeat_timeout()));
    let hub = Arc::new(BroadcastHub::new(config.locking.broadcast_capacity));
    let lifecycle = Arc::new(SessionLifecycle::new(registry.clone(), hub.clone()));

    // Expiry sweep runs until shutdown flips the watch channel
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let sweeper = {
        let lifecycle = lifecycle.clone();
        let interval = config.locking.sweep_interval();
        tokio::spawn(async move { lifecycle.run_sweeper(interval, shutdown_rx).await })
    };

    let app = websocket_routes(WebSocketState::new(hub, lifecycle))
        .merge(http_routes(HttpState::new(registry)))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&config.server));

    let addr = config.server.socket_addr();
    tracing::info!(%addr, "pressroom listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("shutdown signal received");
        })
        .await?;

    let _ = shutdown_tx.send(true);
    sweeper.await?;

    Ok(())
}

fn cors_layer(config: &ServerConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .cors_origins_list()
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    if origins.is_empty() {
        CorsLayer::permissive()
    } else {
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}
