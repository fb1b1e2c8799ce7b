use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{ClientInfo, LanguageTag};

/// Current text of one document slot
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DocumentSlot {
    pub language: LanguageTag,
    pub code: String,
}

/// Roster and documents of a room
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RoomResponse {
    pub room_id: String,
    pub clients: Vec<ClientInfo>,
    pub documents: Vec<DocumentSlot>,
}
