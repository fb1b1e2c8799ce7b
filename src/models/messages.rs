use serde::{Deserialize, Serialize};
use crate::models::{ClientInfo, ConnectionId, LanguageTag, RoomId, SyncError};

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct JoinMessage {
    pub room_id: RoomId,
    #[serde(alias = "username")]
    pub display_name: String,
}

/// Full text of one slot after a local change. The language stays a raw string here so an
/// unknown tag surfaces as a protocol violation instead of an unreadable frame.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CodeChangeMessage {
    pub room_id: RoomId,
    pub language: String,
    pub code: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SyncCodeMessage {
    pub room_id: RoomId,
    #[serde(alias = "socketId")]
    pub connection_id: ConnectionId,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct PingMessage {}

#[derive(Serialize, Deserialize, Debug)]
#[serde(tag = "type")]
pub enum ReceivedMessage {
    #[serde(rename = "join")]
    Join(JoinMessage),
    #[serde(rename = "code-change")]
    CodeChange(CodeChangeMessage),
    #[serde(rename = "sync-code")]
    SyncCode(SyncCodeMessage),
    #[serde(rename = "ping")]
    Ping(PingMessage),
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct JoinedMessage {
    pub clients: Vec<ClientInfo>,
    pub display_name: String,
    pub connection_id: ConnectionId,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CodeUpdateMessage {
    pub language: LanguageTag,
    pub code: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DisconnectedMessage {
    pub connection_id: ConnectionId,
    pub display_name: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PongMessage {
    pub date: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ErrorMessage {
    pub kind: String,
    pub message: String,
}

impl From<&SyncError> for ErrorMessage {
    fn from(err: &SyncError) -> Self {
        ErrorMessage {
            kind: err.kind().to_string(),
            message: err.to_string(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "type")]
pub enum SendMessage {
    #[serde(rename = "joined")]
    Joined(JoinedMessage),
    #[serde(rename = "code-change")]
    CodeChange(CodeUpdateMessage),
    #[serde(rename = "disconnected")]
    Disconnected(DisconnectedMessage),
    #[serde(rename = "pong")]
    Pong(PongMessage),
    #[serde(rename = "error")]
    Error(ErrorMessage),
}
