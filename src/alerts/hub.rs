//! Connection registry and broadcast fan-out for real-time alerts.

use crate::alerts::{AlertMessage, CrashRecord};
use axum::extract::ws::Message;
use std::collections::HashMap;
use tokio::sync::{mpsc, RwLock};
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Tracks the set of open alert connections and fans events out to all of
/// them.
///
/// Each connection is represented by the send half of an unbounded channel;
/// the receive half is drained by a forwarding task that owns the socket's
/// write sink. A send failure therefore means the connection's task has
/// exited, and the hub prunes the entry.
///
/// All mutations of the registry are mutually exclusive with each other and
/// with the snapshot taken during a broadcast. There is no cap on the
/// number of connections.
#[derive(Debug, Default)]
pub struct AlertHub {
    connections: RwLock<HashMap<Uuid, mpsc::UnboundedSender<Message>>>,
}

impl AlertHub {
    /// Create a hub with no connections.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new alert connection, returning its id.
    pub async fn connect(&self, tx: mpsc::UnboundedSender<Message>) -> Uuid {
        let id = Uuid::new_v4();
        let mut connections = self.connections.write().await;
        connections.insert(id, tx);
        info!(
            "Alert client connected: {} (total: {})",
            id,
            connections.len()
        );
        id
    }

    /// Remove a connection. Removing an id that is not present is a no-op,
    /// so the disconnect path and broadcast pruning can race safely.
    pub async fn disconnect(&self, id: &Uuid) {
        let mut connections = self.connections.write().await;
        if connections.remove(id).is_some() {
            info!(
                "Alert client disconnected: {} (total: {})",
                id,
                connections.len()
            );
        }
    }

    /// Number of currently registered connections.
    pub async fn client_count(&self) -> usize {
        self.connections.read().await.len()
    }

    /// Send a message to every registered connection.
    ///
    /// The message is serialized once. Sends go to a snapshot of the
    /// registry so the set is never mutated while it is being iterated; a
    /// failure on one connection never aborts delivery to the rest. Failed
    /// connections are pruned after the full pass. Broadcast itself never
    /// fails.
    pub async fn broadcast(&self, message: &AlertMessage) {
        let json = match serde_json::to_string(message) {
            Ok(json) => json,
            Err(e) => {
                warn!("Failed to serialize alert message: {}", e);
                return;
            }
        };

        let snapshot: Vec<(Uuid, mpsc::UnboundedSender<Message>)> = {
            let connections = self.connections.read().await;
            connections
                .iter()
                .map(|(id, tx)| (*id, tx.clone()))
                .collect()
        };

        let mut failed = Vec::new();
        for (id, tx) in &snapshot {
            if tx.send(Message::Text(json.clone())).is_err() {
                warn!("Failed to send alert to client {}, marking for removal", id);
                failed.push(*id);
            }
        }

        if !failed.is_empty() {
            let mut connections = self.connections.write().await;
            for id in &failed {
                connections.remove(id);
            }
            info!(
                "Pruned {} dead alert connection(s) (total: {})",
                failed.len(),
                connections.len()
            );
        }

        debug!(
            "Broadcast delivered to {} of {} connection(s)",
            snapshot.len() - failed.len(),
            snapshot.len()
        );
    }

    /// Broadcast a persisted crash record in the `new_crash` envelope.
    pub async fn broadcast_crash_notification(&self, record: CrashRecord) {
        self.broadcast(&AlertMessage::NewCrash(record)).await;
    }
}
