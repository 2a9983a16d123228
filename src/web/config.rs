//! Web server configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for the web server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind the server to
    pub host: String,
    /// Port to bind the server to
    pub port: u16,
    /// Whether to enable CORS
    pub enable_cors: bool,
    /// Path to serve static files from
    pub static_path: Option<String>,
    /// Delay between MJPEG parts sent to each viewer, in milliseconds
    pub frame_interval_ms: u64,
    /// Candidate placeholder image paths, probed in order at startup
    pub placeholder_paths: Vec<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: crate::DEFAULT_WEB_PORT,
            enable_cors: true,
            static_path: Some("static".to_string()),
            frame_interval_ms: crate::DEFAULT_FRAME_INTERVAL_MS,
            placeholder_paths: vec![
                PathBuf::from("placeholder.jpg"),
                PathBuf::from("loading.png"),
                PathBuf::from("static/placeholder.png"),
            ],
        }
    }
}

impl ServerConfig {
    /// Create a new configuration with custom host and port.
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Default::default()
        }
    }

    /// Set the host for the web server.
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Set the port for the web server.
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Enable or disable CORS.
    pub fn with_cors(mut self, enable_cors: bool) -> Self {
        self.enable_cors = enable_cors;
        self
    }

    /// Set the static files path.
    pub fn with_static_path(mut self, path: Option<String>) -> Self {
        self.static_path = path;
        self
    }

    /// Set the inter-frame interval of the live feed.
    pub fn with_frame_interval_ms(mut self, interval_ms: u64) -> Self {
        self.frame_interval_ms = interval_ms;
        self
    }

    /// Set the placeholder candidate paths.
    pub fn with_placeholder_paths(mut self, paths: Vec<PathBuf>) -> Self {
        self.placeholder_paths = paths;
        self
    }

    /// Get the full bind address.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
