//! Web server and API endpoints for the crash-notification backend.
//!
//! This module wires the frame buffer, alert hub, and crash store into an
//! axum application: REST endpoints for the detector, the live MJPEG feed
//! for viewers, and the WebSocket alert channel for subscribers.

pub mod config;
pub mod handlers;
pub mod router;
pub mod websocket;

// Re-export commonly used items
pub use config::ServerConfig;
pub use router::{create_app, AppState};

use crate::error::{Result, ServerError};
use std::net::SocketAddr;
use tracing::info;

/// Start the web server with the provided configuration.
pub async fn start_web_server(config: ServerConfig) -> Result<()> {
    let state = AppState::from_config(&config);
    let app = create_app(&config, state);

    let addr = config
        .bind_address()
        .parse::<SocketAddr>()
        .map_err(|e| ServerError::config_error(format!("Invalid bind address: {}", e)))?;

    info!("Starting crashwatch web server on http://{}", addr);
    info!("Dashboard available at http://{}/", addr);
    info!("Live feed: http://{}/stream/live", addr);
    info!("Frame ingest: http://{}/api/stream/push_frame", addr);
    info!("WebSocket alerts: ws://{}/ws", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| ServerError::web_server_error(format!("Failed to bind to address: {}", e)))?;

    axum::serve(listener, app)
        .await
        .map_err(|e| ServerError::web_server_error(format!("Server error: {}", e)))?;

    Ok(())
}
