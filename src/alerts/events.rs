//! Wire types for crash reports and real-time alert messages.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A crash report as submitted by the AI detector.
///
/// Timestamps arrive as ISO-8601 strings; chrono handles the conversion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrashReport {
    /// When the detector saw the crash
    pub detection_timestamp: DateTime<Utc>,
    /// The archived clip this report refers to
    pub video_filename: String,
}

/// A persisted crash record, as stored and broadcast to subscribers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrashRecord {
    /// Server-assigned sequential id
    pub id: i64,
    /// When the detector saw the crash
    pub detection_timestamp: DateTime<Utc>,
    /// The archived clip this report refers to
    pub video_filename: String,
    /// When the server persisted the report (server clock)
    pub created_at: DateTime<Utc>,
}

/// Envelope for messages pushed over the real-time alert channel.
///
/// Serializes as `{"type": "new_crash", "data": {...}}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum AlertMessage {
    NewCrash(CrashRecord),
}
