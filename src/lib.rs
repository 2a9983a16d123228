//! # Crashwatch - Crash Notification Backend
//!
//! The backend half of a dashcam crash-notification system. An external AI
//! detector pushes JPEG frames and crash reports over HTTP; this crate
//! serves the live feed and fans alerts out in real time.
//!
//! ## Features
//!
//! - **Live MJPEG feed**: `multipart/x-mixed-replace` streaming of the
//!   most recent detector frame, per-viewer pacing, placeholder fallback
//! - **Real-time alerts**: WebSocket broadcast of `new_crash` events with
//!   dead-connection pruning
//! - **Crash records**: in-memory persistence with history queries
//! - **Library + Binary**: use as a crate or standalone server
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use crashwatch::{start_web_server, ServerConfig};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::new("0.0.0.0", 8000);
//!     start_web_server(config).await?;
//!     Ok(())
//! }
//! ```

pub mod alerts;
pub mod error;
pub mod store;
pub mod stream;
pub mod web;

// Re-export public API
pub use alerts::{AlertHub, AlertMessage, CrashRecord, CrashReport};
pub use error::{Result, ServerError};
pub use store::CrashStore;
pub use stream::{FrameBuffer, PlaceholderImage, MJPEG_BOUNDARY, MJPEG_CONTENT_TYPE};
pub use web::{create_app, start_web_server, AppState, ServerConfig};

/// The default inter-frame delay for the live feed, in milliseconds
/// (targets roughly 20 parts per second).
pub const DEFAULT_FRAME_INTERVAL_MS: u64 = 50;

/// The default web server port
pub const DEFAULT_WEB_PORT: u16 = 8000;
