pub mod sync_service;

pub use sync_service::{EngineStats, SyncEngine, SyncState};
