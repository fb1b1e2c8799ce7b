use crate::{models::{ErrorResponse, RoomResponse}, AppState};
use axum::{extract::{Path, State}, http::StatusCode, Json};
use std::sync::Arc;
use tracing::debug;

/// Roster and current documents of a room
pub async fn room_get(
    State(state): State<Arc<AppState>>,
    Path(room_id): Path<String>,
) -> Result<(StatusCode, Json<RoomResponse>), (StatusCode, Json<ErrorResponse>)> {

    match state.engine.room_snapshot(&room_id).await {
        Some(room) => Ok((StatusCode::OK, Json(room))),
        None => {
            debug!("Room '{}' not found", room_id);
            let status = StatusCode::NOT_FOUND;
            Err((status, Json(ErrorResponse {
                code: status.as_u16(),
                status: status.to_string(),
                error: format!("Room '{}' not found", room_id),
            })))
        }
    }
}
