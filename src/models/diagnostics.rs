use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Response for diagnostics information
#[derive(Serialize, Deserialize, ToSchema)]
pub struct DiagnosticsResponse {
    /// Open WebSocket connections, joined or not
    pub n_conn: u32,
    /// Connections that completed a join
    pub n_participants: u32,
    pub n_rooms: u32,
    /// Rooms holding at least one document slot
    pub n_doc_rooms: u32,
    pub uptime_secs: i64,
    pub cpu_usage: f32,
    /// Bytes of memory in use on the host
    pub memory_used: u64,
    pub memory_total: u64,
}
