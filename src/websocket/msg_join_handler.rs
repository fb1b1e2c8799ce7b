use tracing::info;
use crate::models::{ConnectionId, JoinMessage, SyncError};
use crate::services::SyncEngine;

/// Handle JoinMessage
pub async fn handle_join_message(join_msg: &JoinMessage, connection_id: &ConnectionId, engine: &SyncEngine) -> Result<(), SyncError> {
    info!("Join message received for room {}: user={}, connection={}", join_msg.room_id, join_msg.display_name, connection_id);
    engine.join(connection_id, &join_msg.room_id, &join_msg.display_name).await?;
    Ok(())
}
