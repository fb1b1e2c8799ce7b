use crate::{models::DiagnosticsResponse, AppState};
use axum::{extract::State, http::StatusCode, Json};
use chrono::Utc;
use std::sync::{Arc, Mutex, OnceLock};
use sysinfo::System;
use tracing::info;

static SYSTEM_MONITOR: OnceLock<Mutex<System>> = OnceLock::new();

/// CPU percentage plus used and total memory in bytes. Zeroes if the monitor lock is poisoned.
fn sample_host() -> (f32, u64, u64) {
    let monitor = SYSTEM_MONITOR.get_or_init(|| Mutex::new(System::new()));
    let Ok(mut sys) = monitor.lock() else {
        return (0.0, 0, 0);
    };
    sys.refresh_cpu();
    sys.refresh_memory();
    (sys.global_cpu_info().cpu_usage(), sys.used_memory(), sys.total_memory())
}

/// Report connection, room and process statistics
pub async fn diagnostics(
    State(state): State<Arc<AppState>>,
) -> (StatusCode, Json<DiagnosticsResponse>) {
    let n_conn = state.outbox.len().await as u32;
    let stats = state.engine.stats().await;
    let (cpu_usage, memory_used, memory_total) = sample_host();

    info!(
        "Diagnostics: {} connections, {} participants in {} rooms, CPU {:.1}%, {} MB used",
        n_conn,
        stats.participants,
        stats.rooms,
        cpu_usage,
        memory_used / 1024 / 1024
    );

    (
        StatusCode::OK,
        Json(DiagnosticsResponse {
            n_conn,
            n_participants: stats.participants as u32,
            n_rooms: stats.rooms as u32,
            n_doc_rooms: stats.document_rooms as u32,
            uptime_secs: (Utc::now() - state.started_at).num_seconds(),
            cpu_usage,
            memory_used,
            memory_total,
        }),
    )
}
