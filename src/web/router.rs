//! Web application router, shared state, and middleware setup.

use crate::alerts::AlertHub;
use crate::store::CrashStore;
use crate::stream::{FrameBuffer, PlaceholderImage};
use crate::web::config::ServerConfig;
use crate::web::{handlers, websocket};
use axum::{
    routing::{get, post},
    Router,
};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};
use tracing::info;

/// Shared application state handed to every handler.
///
/// The frame buffer, alert hub, and crash store are process-wide
/// singletons; cloning the state clones the `Arc`s, not the contents.
#[derive(Clone)]
pub struct AppState {
    /// The single most-recent-frame buffer
    pub frames: Arc<FrameBuffer>,
    /// Fallback image shown when no live frame is available
    pub placeholder: Arc<PlaceholderImage>,
    /// Registry of open real-time alert connections
    pub alerts: Arc<AlertHub>,
    /// Persisted crash records
    pub crashes: Arc<CrashStore>,
    /// Pacing delay between MJPEG parts per viewer
    pub frame_interval: Duration,
}

impl AppState {
    /// Build fresh state from a server configuration. The placeholder is
    /// resolved here, once.
    pub fn from_config(config: &ServerConfig) -> Self {
        Self {
            frames: Arc::new(FrameBuffer::new()),
            placeholder: Arc::new(PlaceholderImage::load(&config.placeholder_paths)),
            alerts: Arc::new(AlertHub::new()),
            crashes: Arc::new(CrashStore::new()),
            frame_interval: Duration::from_millis(config.frame_interval_ms),
        }
    }
}

/// Create the main axum application with all routes and middleware.
pub fn create_app(config: &ServerConfig, state: AppState) -> Router {
    let mut app = Router::new()
        // Crash report ingest and history
        .route("/api/crashes", post(handlers::report_crash))
        .route("/api/crashes/history", get(handlers::crash_history))
        // Frame ingest and clear signal from the detector
        .route("/api/stream/push_frame", post(handlers::push_frame))
        .route("/api/stream/clear", post(handlers::clear_stream))
        // Live MJPEG feed
        .route("/stream/live", get(handlers::live_stream))
        // Real-time alert WebSocket
        .route("/ws", get(websocket::websocket_handler))
        .route("/api/health", get(handlers::health_check))
        .with_state(state);

    // Static file serving and the dashboard index
    let mut index_served = false;
    if let Some(static_path) = &config.static_path {
        let static_path = PathBuf::from(static_path);
        if static_path.exists() {
            info!("Serving static files from: {:?}", static_path);
            app = app.nest_service("/static", ServeDir::new(&static_path));

            let index_file = static_path.join("index.html");
            if index_file.exists() {
                app = app.route(
                    "/",
                    get(move || handlers::serve_index(index_file.clone())),
                );
                index_served = true;
            }
        } else {
            tracing::warn!(
                "Static path {:?} does not exist, serving embedded dashboard",
                static_path
            );
        }
    }
    if !index_served {
        app = app.route("/", get(handlers::default_index));
    }

    // Middleware layers
    app = app.layer(TraceLayer::new_for_http());
    if config.enable_cors {
        app = app.layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );
    }

    app
}
