use std::collections::HashMap;
use tokio::sync::{mpsc, RwLock};
use tokio::sync::mpsc::error::TrySendError;
use tracing::{debug, warn};

use crate::models::{ConnectionId, SendMessage};

/// A message addressed to a single connection.
#[derive(Debug, Clone, PartialEq)]
pub struct Delivery {
    pub to: ConnectionId,
    pub message: SendMessage,
}

impl Delivery {
    pub fn new(to: ConnectionId, message: SendMessage) -> Self {
        Self { to, message }
    }
}

/// Outbound queues of all open connections.
///
/// Enqueueing never waits: each connection's writer task drains its own bounded channel onto
/// the socket. A recipient that is gone or has a full queue is skipped.
#[derive(Debug, Default)]
pub struct Outbox {
    senders: RwLock<HashMap<ConnectionId, mpsc::Sender<SendMessage>>>,
}

impl Outbox {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn register(&self, connection_id: ConnectionId, sender: mpsc::Sender<SendMessage>) {
        self.senders.write().await.insert(connection_id, sender);
    }

    pub async fn unregister(&self, connection_id: &ConnectionId) {
        self.senders.write().await.remove(connection_id);
    }

    /// Number of open connections, joined or not.
    pub async fn len(&self) -> usize {
        self.senders.read().await.len()
    }

    /// Queue one message. Returns false if the recipient could not take it.
    pub async fn send(&self, connection_id: &ConnectionId, message: SendMessage) -> bool {
        let senders = self.senders.read().await;
        Self::enqueue(&senders, connection_id, message)
    }

    /// Queue every delivery, skipping recipients that fail. Returns how many were queued.
    pub async fn dispatch(&self, deliveries: Vec<Delivery>) -> usize {
        let senders = self.senders.read().await;
        deliveries
            .into_iter()
            .map(|delivery| Self::enqueue(&senders, &delivery.to, delivery.message))
            .filter(|queued| *queued)
            .count()
    }

    fn enqueue(
        senders: &HashMap<ConnectionId, mpsc::Sender<SendMessage>>,
        connection_id: &ConnectionId,
        message: SendMessage,
    ) -> bool {
        let Some(sender) = senders.get(connection_id) else {
            debug!("Skipping delivery to unknown connection {}", connection_id);
            return false;
        };
        match sender.try_send(message) {
            Ok(()) => true,
            Err(TrySendError::Full(_)) => {
                warn!("Outbound queue full for connection {}, dropping message", connection_id);
                false
            }
            Err(TrySendError::Closed(_)) => {
                warn!("Connection {} already closed, dropping message", connection_id);
                false
            }
        }
    }
}
