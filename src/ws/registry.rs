use std::collections::HashMap;

use crate::models::ConnectionId;

/// Display names of connections that have joined, keyed by connection.
///
/// Records live exactly as long as the connection; removing one does not touch room
/// membership, the engine sequences that itself.
#[derive(Debug, Default)]
pub struct ConnectionRegistry {
    participants: HashMap<ConnectionId, String>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite the participant record, returning the previous name.
    pub fn register(&mut self, connection_id: ConnectionId, display_name: impl Into<String>) -> Option<String> {
        self.participants.insert(connection_id, display_name.into())
    }

    pub fn display_name_of(&self, connection_id: &ConnectionId) -> Option<&str> {
        self.participants.get(connection_id).map(String::as_str)
    }

    pub fn remove(&mut self, connection_id: &ConnectionId) -> Option<String> {
        self.participants.remove(connection_id)
    }

    pub fn len(&self) -> usize {
        self.participants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }
}
