//! Room synchronization server for collaborative multi-language code editing.
//!
//! Browser clients connect over a WebSocket, join a named room and exchange the full text of
//! the room's markup, style and script documents. The server keeps the latest text of every
//! slot, tracks who is in each room and fans edits and presence changes out to the members.

pub mod config;
pub mod docs;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;
pub mod websocket;
pub mod ws;

use axum::Router;
use axum::http::HeaderValue;
use chrono::{DateTime, Utc};
use std::path::Path;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use tracing::warn;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use config::Config;
use docs::ApiDoc;
use routes::{create_api_routes, create_ws_routes};
use services::SyncEngine;
use websocket::Outbox;

/// State shared by every request and connection task
pub struct AppState {
    pub config: Config,
    pub engine: Arc<SyncEngine>,
    pub outbox: Arc<Outbox>,
    pub started_at: DateTime<Utc>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let outbox = Arc::new(Outbox::new());
        let engine = Arc::new(SyncEngine::new(outbox.clone(), config.retain_empty_room_documents));
        Self {
            config,
            engine,
            outbox,
            started_at: Utc::now(),
        }
    }
}

/// Build the complete router: REST API, WebSocket endpoint, Swagger UI and the optional
/// static client.
pub fn create_app(state: Arc<AppState>) -> Router {
    let mut app = Router::new()
        // Mount API routes
        .nest("/api", create_api_routes(state.clone()))
        .merge(create_ws_routes(state.clone()))
        // Mount Swagger UI
        .merge(SwaggerUi::new("/swagger").url("/api-docs/openapi.json", ApiDoc::openapi()));

    // Serve the built client, letting its router handle unknown paths
    if let Some(dir) = &state.config.static_dir {
        let index = Path::new(dir).join("index.html");
        app = app.fallback_service(ServeDir::new(dir).not_found_service(ServeFile::new(index)));
    }

    app.layer(cors_layer(&state.config))
        .layer(TraceLayer::new_for_http())
}

fn cors_layer(config: &Config) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .cors_origin_list()
        .into_iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("Ignoring invalid CORS origin '{}': {}", origin, e);
                None
            }
        })
        .collect();

    if origins.is_empty() {
        return CorsLayer::new();
    }
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}
