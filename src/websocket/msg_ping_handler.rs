use tracing::{debug, error};
use chrono::Utc;
use crate::models::{ConnectionId, PingMessage, PongMessage, SendMessage};
use crate::websocket::outbox::Outbox;

/// Handle PingMessage - reply with the server time
pub async fn handle_ping_message(_ping_msg: &PingMessage, connection_id: &ConnectionId, outbox: &Outbox) {
    debug!("Ping message received from connection {}", connection_id);

    let pong = SendMessage::Pong(PongMessage { date: Utc::now().to_rfc3339() });
    if !outbox.send(connection_id, pong).await {
        error!("Failed to send Pong message to connection {}", connection_id);
    }
}
