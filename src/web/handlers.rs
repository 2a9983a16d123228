//! HTTP handlers for the REST API and the live MJPEG feed.

use crate::alerts::{CrashRecord, CrashReport};
use crate::stream::{mjpeg_stream, MJPEG_CONTENT_TYPE};
use crate::web::router::AppState;
use axum::{
    body::Body,
    extract::{Query, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Json},
};
use bytes::Bytes;
use serde::Deserialize;
use serde_json::json;
use std::path::PathBuf;
use tracing::{error, info};

/// Serve the live MJPEG stream to one viewer.
///
/// The body is unbounded; the connection stays open until the client
/// disconnects, at which point the part generator is dropped.
pub async fn live_stream(State(state): State<AppState>) -> impl IntoResponse {
    info!("Viewer connected to live MJPEG stream");
    let stream = mjpeg_stream(
        state.frames.clone(),
        state.placeholder.clone(),
        state.frame_interval,
    );
    (
        [
            (header::CONTENT_TYPE, MJPEG_CONTENT_TYPE),
            (header::CACHE_CONTROL, "no-cache"),
        ],
        Body::from_stream(stream),
    )
}

/// Receive one JPEG frame from the detector.
///
/// An empty body is a client error and mutates nothing.
pub async fn push_frame(
    State(state): State<AppState>,
    frame: Bytes,
) -> Result<StatusCode, StatusCode> {
    if frame.is_empty() {
        return Err(StatusCode::BAD_REQUEST);
    }
    state.frames.update(frame).await;
    Ok(StatusCode::NO_CONTENT)
}

/// Clear the frame buffer when the detector stops, so viewers fall back
/// to the placeholder instead of freezing on a stale frame.
pub async fn clear_stream(State(state): State<AppState>) -> StatusCode {
    info!("Received request to clear the video stream buffer");
    state.frames.clear().await;
    StatusCode::NO_CONTENT
}

/// Handle a crash report from the detector: persist it, then broadcast
/// the stored record to every open alert connection.
pub async fn report_crash(
    State(state): State<AppState>,
    Json(report): Json<CrashReport>,
) -> (StatusCode, Json<CrashRecord>) {
    info!("Received crash report for video: {}", report.video_filename);
    let record = state.crashes.insert(report).await;
    state
        .alerts
        .broadcast_crash_notification(record.clone())
        .await;
    info!("Crash {} broadcasted", record.id);
    (StatusCode::CREATED, Json(record))
}

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    #[serde(default)]
    pub skip: usize,
    #[serde(default = "default_history_limit")]
    pub limit: usize,
}

fn default_history_limit() -> usize {
    100
}

/// Historical crash records, newest detection first.
pub async fn crash_history(
    State(state): State<AppState>,
    Query(query): Query<HistoryQuery>,
) -> Json<Vec<CrashRecord>> {
    info!(
        "Fetching crash history (skip={}, limit={})",
        query.skip, query.limit
    );
    Json(state.crashes.history(query.skip, query.limit).await)
}

/// Health check endpoint.
pub async fn health_check(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "service": "crashwatch",
        "version": env!("CARGO_PKG_VERSION"),
        "alert_clients": state.alerts.client_count().await,
        "crash_records": state.crashes.len().await,
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// Serve the dashboard HTML page from the configured static directory.
pub async fn serve_index(path: PathBuf) -> Result<Html<String>, StatusCode> {
    match tokio::fs::read_to_string(&path).await {
        Ok(content) => Ok(Html(content)),
        Err(e) => {
            error!("Failed to read {:?}: {}", path, e);
            Err(StatusCode::NOT_FOUND)
        }
    }
}

/// Serve the embedded dashboard when no static files are available.
pub async fn default_index() -> Html<&'static str> {
    Html(DEFAULT_INDEX_HTML)
}

/// Minimal built-in dashboard: the live feed plus a WebSocket alert log.
const DEFAULT_INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Crashwatch - Live Feed</title>
    <style>
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            background: #1a1a2e;
            color: #eee;
            margin: 0;
            padding: 20px;
        }
        .container { max-width: 900px; margin: 0 auto; }
        h1 { text-align: center; }
        .feed {
            display: block;
            margin: 0 auto 20px;
            max-width: 100%;
            border-radius: 8px;
            background: #000;
        }
        .status { text-align: center; margin-bottom: 20px; opacity: 0.8; }
        .alert {
            background: #b33939;
            border-radius: 6px;
            padding: 10px 15px;
            margin-bottom: 8px;
        }
        .alert time { opacity: 0.8; margin-right: 10px; }
    </style>
</head>
<body>
    <div class="container">
        <h1>Crashwatch</h1>
        <img class="feed" src="/stream/live" alt="Live feed">
        <div class="status" id="status">Connecting to alert channel...</div>
        <div id="alerts"></div>
    </div>

    <script>
        const statusEl = document.getElementById('status');
        const alertsEl = document.getElementById('alerts');

        function connect() {
            const protocol = window.location.protocol === 'https:' ? 'wss:' : 'ws:';
            const ws = new WebSocket(`${protocol}//${window.location.host}/ws`);

            ws.onopen = () => { statusEl.textContent = 'Connected - waiting for alerts'; };
            ws.onclose = () => {
                statusEl.textContent = 'Disconnected - retrying...';
                setTimeout(connect, 2000);
            };
            ws.onmessage = (event) => {
                try {
                    const msg = JSON.parse(event.data);
                    if (msg.type === 'new_crash') {
                        const div = document.createElement('div');
                        div.className = 'alert';
                        div.innerHTML =
                            `<time>${msg.data.detection_timestamp}</time>` +
                            `Crash #${msg.data.id} detected in ${msg.data.video_filename}`;
                        alertsEl.prepend(div);
                    }
                } catch (e) {
                    console.error('Bad alert message:', e);
                }
            };
        }

        connect();

        fetch('/api/crashes/history?limit=20')
            .then(r => r.json())
            .then(records => {
                records.forEach(rec => {
                    const div = document.createElement('div');
                    div.className = 'alert';
                    div.innerHTML =
                        `<time>${rec.detection_timestamp}</time>` +
                        `Crash #${rec.id} detected in ${rec.video_filename}`;
                    alertsEl.append(div);
                });
            })
            .catch(e => console.error('Failed to fetch history:', e));
    </script>
</body>
</html>"#;
