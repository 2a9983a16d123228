//! Error handling for the crashwatch backend.

/// A specialized `Result` type for crashwatch operations.
pub type Result<T> = std::result::Result<T, ServerError>;

/// The main error type for crashwatch operations.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Image decode or encode failed
    #[error("Image error: {0}")]
    Image(String),

    /// Web server error
    #[error("Web server error: {0}")]
    WebServer(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ServerError {
    /// Create a new image error
    pub fn image_error(msg: impl Into<String>) -> Self {
        Self::Image(msg.into())
    }

    /// Create a new web server error
    pub fn web_server_error(msg: impl Into<String>) -> Self {
        Self::WebServer(msg.into())
    }

    /// Create a new configuration error
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
