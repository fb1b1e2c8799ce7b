use tracing::debug;
use crate::models::{CodeChangeMessage, ConnectionId, SyncError};
use crate::services::SyncEngine;

/// Handle CodeChangeMessage - store and broadcast to the rest of the room
pub async fn handle_code_change_message(change_msg: CodeChangeMessage, connection_id: &ConnectionId, engine: &SyncEngine) -> Result<(), SyncError> {
    debug!("Code change received for room {}: language={}, {} bytes", change_msg.room_id, change_msg.language, change_msg.code.len());
    let peers = engine
        .edit(connection_id, &change_msg.room_id, &change_msg.language, change_msg.code)
        .await?;
    debug!("Code change from {} forwarded to {} peers", connection_id, peers);
    Ok(())
}
