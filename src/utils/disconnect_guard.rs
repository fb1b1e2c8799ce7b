use std::sync::Arc;
use tokio::runtime::Handle;
use tracing::{error, warn};

use crate::models::ConnectionId;
use crate::services::SyncEngine;

/// Guarantees the leave sequence of a connection runs exactly once.
///
/// The connection task calls `finish` on its normal exit path. If the task is dropped before
/// that (runtime shutdown, aborted future) the guard spawns the cleanup instead, so room
/// membership never keeps a dead connection.
pub struct DisconnectGuard {
    engine: Option<Arc<SyncEngine>>,
    connection_id: ConnectionId,
}

impl DisconnectGuard {
    pub fn new(engine: Arc<SyncEngine>, connection_id: ConnectionId) -> Self {
        Self {
            engine: Some(engine),
            connection_id,
        }
    }

    pub async fn finish(mut self) {
        if let Some(engine) = self.engine.take() {
            engine.disconnecting(&self.connection_id).await;
        }
    }
}

impl Drop for DisconnectGuard {
    fn drop(&mut self) {
        let Some(engine) = self.engine.take() else {
            return;
        };
        let connection_id = self.connection_id.clone();
        match Handle::try_current() {
            Ok(handle) => {
                warn!("Connection {} dropped before cleanup, finishing in background", connection_id);
                handle.spawn(async move {
                    engine.disconnecting(&connection_id).await;
                });
            }
            Err(_) => error!("No runtime left to clean up connection {}", connection_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::websocket::outbox::Outbox;
    use tokio::sync::mpsc;

    #[tokio::test]
    async fn dropped_guard_still_cleans_up() {
        let outbox = Arc::new(Outbox::new());
        let engine = Arc::new(SyncEngine::new(outbox.clone(), false));
        let conn = ConnectionId::from("a");
        let (tx, _rx) = mpsc::channel(4);
        outbox.register(conn.clone(), tx).await;
        engine.join(&conn, "room", "ada").await.unwrap();

        drop(DisconnectGuard::new(engine.clone(), conn.clone()));

        for _ in 0..50 {
            if engine.stats().await.rooms == 0 {
                break;
            }
            tokio::task::yield_now().await;
        }
        assert_eq!(engine.stats().await.rooms, 0);
        assert_eq!(outbox.len().await, 0);
    }

    #[tokio::test]
    async fn finish_runs_cleanup_inline() {
        let outbox = Arc::new(Outbox::new());
        let engine = Arc::new(SyncEngine::new(outbox, false));
        let conn = ConnectionId::from("a");
        engine.join(&conn, "room", "ada").await.unwrap();

        DisconnectGuard::new(engine.clone(), conn).finish().await;
        assert_eq!(engine.stats().await.participants, 0);
    }
}
