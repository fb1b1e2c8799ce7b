use crate::{handlers::{diagnostics, health_check, ready_check, room_get}, websocket::websocket_handler, AppState};
use axum::{routing::get, Router};
use std::sync::Arc;

/// Create API routes
pub fn create_api_routes(state: Arc<AppState>) -> Router {
    Router::<Arc<AppState>>::new()
        .route("/health", get(health_check))
        .route("/ready", get(ready_check))
        .route("/v1/diagnostics", get(diagnostics))
        .route("/v1/rooms/:room_id", get(room_get))
        .with_state(state)
}

/// Create the WebSocket route the browser client connects to
pub fn create_ws_routes(state: Arc<AppState>) -> Router {
    Router::<Arc<AppState>>::new()
        .route("/ws", get(websocket_handler))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::models::{ConnectionId, LanguageTag, RoomResponse};
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    async fn get_json(router: Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let response = router
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn health_reports_service_name() {
        let state = Arc::new(AppState::new(Config::default()));
        let (status, body) = get_json(create_api_routes(state), "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "colabri-code");
    }

    #[tokio::test]
    async fn unknown_room_is_not_found() {
        let state = Arc::new(AppState::new(Config::default()));
        let (status, body) = get_json(create_api_routes(state), "/v1/rooms/nowhere").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], 404);
    }

    #[tokio::test]
    async fn room_lists_roster_and_documents() {
        let state = Arc::new(AppState::new(Config::default()));
        let conn = ConnectionId::from("a");
        state.engine.join(&conn, "lobby", "ada").await.unwrap();
        state.engine.edit(&conn, "lobby", "css", "body {}".to_string()).await.unwrap();

        let (status, body) = get_json(create_api_routes(state), "/v1/rooms/lobby").await;
        assert_eq!(status, StatusCode::OK);
        let room: RoomResponse = serde_json::from_value(body).unwrap();
        assert_eq!(room.clients.len(), 1);
        assert_eq!(room.clients[0].display_name, "ada");
        assert_eq!(room.documents[1].language, LanguageTag::Style);
        assert_eq!(room.documents[1].code, "body {}");
        assert_eq!(room.documents[2].code, "");
    }

    #[tokio::test]
    async fn diagnostics_counts_rooms() {
        let state = Arc::new(AppState::new(Config::default()));
        state.engine.join(&ConnectionId::from("a"), "r1", "ada").await.unwrap();
        state.engine.join(&ConnectionId::from("b"), "r2", "bob").await.unwrap();

        let (status, body) = get_json(create_api_routes(state), "/v1/diagnostics").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["n_rooms"], 2);
        assert_eq!(body["n_participants"], 2);
        assert_eq!(body["n_conn"], 0);
        assert_eq!(body["n_doc_rooms"], 0);
        assert!(body["memory_used"].is_u64());
        assert!(body.get("memory_free").is_none());
    }
}
