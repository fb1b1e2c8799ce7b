use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use crate::models::{ConnectionId, RoomId};

/// Response for an error
#[derive(Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub code: u16,
    pub status: String,
    pub error: String,
}

/// Protocol violations raised by the sync engine.
///
/// A rejected event leaves every store untouched and is only ever reported back to the
/// connection that sent it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyncError {
    #[error("unknown language tag '{0}'")]
    UnknownLanguage(String),

    #[error("connection {0} has not joined a room")]
    NotJoined(ConnectionId),

    #[error("connection {connection} is not a member of room '{room}'")]
    NotMember { connection: ConnectionId, room: RoomId },

    #[error("connection {target} is not in room '{room}'")]
    TargetNotInRoom { target: ConnectionId, room: RoomId },

    #[error("room id must not be empty")]
    EmptyRoomId,

    #[error("malformed message: {0}")]
    Malformed(String),
}

impl SyncError {
    /// Stable machine readable name sent to clients in `error` frames.
    pub fn kind(&self) -> &'static str {
        match self {
            SyncError::UnknownLanguage(_) => "unknown-language",
            SyncError::NotJoined(_) => "not-joined",
            SyncError::NotMember { .. } => "not-member",
            SyncError::TargetNotInRoom { .. } => "target-not-in-room",
            SyncError::EmptyRoomId => "empty-room-id",
            SyncError::Malformed(_) => "malformed",
        }
    }
}
