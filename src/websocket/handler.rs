use std::sync::Arc;
use axum::{
    extract::{State, ws::{Message, WebSocket, WebSocketUpgrade}},
    response::Response,
};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use crate::AppState;
use crate::models::{ConnectionId, ReceivedMessage, SendMessage, SyncError};
use crate::utils::disconnect_guard::DisconnectGuard;
use crate::websocket::msg_code_change_handler::handle_code_change_message;
use crate::websocket::msg_join_handler::handle_join_message;
use crate::websocket::msg_ping_handler::handle_ping_message;
use crate::websocket::msg_sync_code_handler::handle_sync_code_message;

/// WebSocket handler
pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(app_state): State<Arc<AppState>>,
) -> Response {
    debug!("New WebSocket connection attempt");
    ws.on_upgrade(move |socket| handle_socket(socket, app_state))
}

/// Handle WebSocket connection
async fn handle_socket(socket: WebSocket, app_state: Arc<AppState>) {

    // Generate unique connection ID to identify this client
    let connection_id = ConnectionId::generate();
    info!("WebSocket connection established with connection_id: {}", connection_id);

    // Register the outbound queue before any event can address this connection
    let (tx, mut rx) = mpsc::channel::<SendMessage>(app_state.config.outbound_buffer.max(1));
    app_state.outbox.register(connection_id.clone(), tx).await;
    let guard = DisconnectGuard::new(app_state.engine.clone(), connection_id.clone());

    let (mut sender, mut receiver) = socket.split();

    // Drain the outbound queue onto the socket
    let writer_id = connection_id.clone();
    let mut send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            let text = match serde_json::to_string(&msg) {
                Ok(text) => text,
                Err(e) => {
                    error!("Failed to serialize message for connection {}: {}", writer_id, e);
                    continue;
                }
            };
            if sender.send(Message::Text(text)).await.is_err() {
                debug!("Socket of connection {} closed while sending", writer_id);
                break;
            }
        }
    });

    // Read frames and feed them to the engine
    let reader_state = app_state.clone();
    let reader_id = connection_id.clone();
    let mut recv_task = tokio::spawn(async move {
        while let Some(frame) = receiver.next().await {
            match frame {
                Ok(Message::Text(text)) => handle_text_frame(&reader_state, &reader_id, &text).await,
                Ok(Message::Close(_)) => break,
                // Binary frames carry nothing in this protocol, pings are answered by axum
                Ok(_) => continue,
                Err(e) => {
                    debug!("WebSocket error on connection {}: {}", reader_id, e);
                    break;
                }
            }
        }
    });

    // Wait for either task to finish (and finish the other)
    tokio::select! {
        _ = (&mut send_task) => recv_task.abort(),
        _ = (&mut recv_task) => send_task.abort(),
    };

    guard.finish().await;
    info!("WebSocket connection {} terminated", connection_id);
}

async fn handle_text_frame(app_state: &AppState, connection_id: &ConnectionId, text: &str) {
    let engine = &app_state.engine;

    // Parse the incoming message as JSON
    let json_msg: ReceivedMessage = match serde_json::from_str(text) {
        Ok(json_msg) => json_msg,
        Err(e) => {
            warn!("Failed to parse message from connection {}: {}", connection_id, e);
            engine.reject(connection_id, &SyncError::Malformed(e.to_string())).await;
            return;
        }
    };

    // Handle different message types
    let result = match json_msg {
        ReceivedMessage::Join(join_msg) => handle_join_message(&join_msg, connection_id, engine).await,
        ReceivedMessage::CodeChange(change_msg) => handle_code_change_message(change_msg, connection_id, engine).await,
        ReceivedMessage::SyncCode(sync_msg) => handle_sync_code_message(&sync_msg, connection_id, engine).await,
        ReceivedMessage::Ping(ping_msg) => {
            handle_ping_message(&ping_msg, connection_id, &app_state.outbox).await;
            Ok(())
        }
    };

    if let Err(e) = result {
        engine.reject(connection_id, &e).await;
    }
}
