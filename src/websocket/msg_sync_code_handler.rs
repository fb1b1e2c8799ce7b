use tracing::info;
use crate::models::{ConnectionId, SyncCodeMessage, SyncError};
use crate::services::SyncEngine;

/// Handle SyncCodeMessage - push every slot of the room to the named newcomer
pub async fn handle_sync_code_message(sync_msg: &SyncCodeMessage, connection_id: &ConnectionId, engine: &SyncEngine) -> Result<(), SyncError> {
    info!("Sync requested for room {} by {} on behalf of {}", sync_msg.room_id, connection_id, sync_msg.connection_id);
    engine.sync_request(connection_id, &sync_msg.room_id, &sync_msg.connection_id).await?;
    Ok(())
}
