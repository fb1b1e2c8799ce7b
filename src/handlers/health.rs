use std::sync::Arc;
use axum::{extract::State, Json};
use crate::{models::HealthResponse, AppState};
use tracing::debug;

/// Health check endpoint
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    debug!("Health check requested");
    Json(HealthResponse {
        status: "ok".to_string(),
        service: state.config.service_name.clone(),
        message: "Server is running".to_string(),
    })
}

/// Readiness check endpoint
pub async fn ready_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    debug!("Readiness check requested");
    // Taking the engine lock proves no event handler is wedged on it.
    let stats = state.engine.stats().await;
    Json(HealthResponse {
        status: "ok".to_string(),
        service: state.config.service_name.clone(),
        message: format!("Service is ready, {} rooms active", stats.rooms),
    })
}
