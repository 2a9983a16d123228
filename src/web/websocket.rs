//! WebSocket endpoint for real-time crash alerts.
//!
//! The server only pushes; incoming client text is read and ignored so the
//! transport stays alive and disconnects are noticed promptly.

use crate::alerts::AlertHub;
use crate::web::router::AppState;
use axum::extract::ws::{Message, WebSocket};
use axum::extract::{State, WebSocketUpgrade};
use axum::response::Response;
use futures_util::{SinkExt, StreamExt};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// WebSocket upgrade handler.
pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
) -> Response {
    ws.on_upgrade(move |socket| handle_websocket(socket, state.alerts.clone()))
}

/// Drive one alert connection from handshake to closure.
///
/// The hub holds only the channel's send half; this function owns the
/// socket. Whichever side finishes first (client disconnect, transport
/// error, or the forwarding task exiting) tears the connection down, and
/// the hub removal is idempotent either way.
async fn handle_websocket(socket: WebSocket, hub: Arc<AlertHub>) {
    let (mut sink, mut source) = socket.split();
    let (tx, mut rx) = mpsc::unbounded_channel();

    let id = hub.connect(tx).await;

    // Forward broadcast messages from the hub into the socket.
    let mut send_task = tokio::spawn(async move {
        while let Some(message) = rx.recv().await {
            if let Err(e) = sink.send(message).await {
                warn!("Failed to send alert over WebSocket: {}", e);
                break;
            }
        }
    });

    // Drain incoming traffic; the content is ignored.
    let id_recv = id;
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = source.next().await {
            match msg {
                Ok(Message::Text(text)) => {
                    debug!("Ignoring message from alert client {}: {}", id_recv, text);
                }
                Ok(Message::Close(_)) => {
                    info!("Alert client {} sent close", id_recv);
                    break;
                }
                Ok(_) => {}
                Err(e) => {
                    warn!("WebSocket error for alert client {}: {}", id_recv, e);
                    break;
                }
            }
        }
    });

    tokio::select! {
        _ = &mut send_task => recv_task.abort(),
        _ = &mut recv_task => send_task.abort(),
    }

    hub.disconnect(&id).await;
}
