//! Room synchronization engine.
//!
//! `SyncState` owns the connection registry, the room directory and the document store and
//! turns each inbound event into the list of messages every recipient must get. `SyncEngine`
//! serializes all events through one lock around that state and hands the resulting deliveries
//! to the outbox before releasing it, so each recipient observes events in the order they were
//! applied. Socket writes happen later in the per-connection writer tasks.
//!
//! Document sync is last-write-wins: an edit replaces the whole slot and is broadcast as is.
//! Two participants typing into the same slot at once race, and the edit applied last is the one
//! every peer ends up with.

use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::models::{
    ClientInfo, CodeUpdateMessage, ConnectionId, DisconnectedMessage, DocumentSlot, ErrorMessage,
    JoinedMessage, LanguageTag, RoomResponse, SendMessage, SyncError,
};
use crate::websocket::outbox::{Delivery, Outbox};
use crate::ws::{ConnectionRegistry, DocumentStore, RoomDirectory};

/// Counters for diagnostics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EngineStats {
    pub participants: usize,
    pub rooms: usize,
    pub document_rooms: usize,
}

#[derive(Debug, Default)]
pub struct SyncState {
    registry: ConnectionRegistry,
    directory: RoomDirectory,
    documents: DocumentStore,
    retain_documents: bool,
}

impl SyncState {
    /// With `retain_documents` set, document slots survive the reclamation of their room.
    pub fn new(retain_documents: bool) -> Self {
        Self {
            retain_documents,
            ..Self::default()
        }
    }

    pub fn registry(&self) -> &ConnectionRegistry {
        &self.registry
    }

    pub fn directory(&self) -> &RoomDirectory {
        &self.directory
    }

    pub fn documents(&self) -> &DocumentStore {
        &self.documents
    }

    /// Register the participant, add it to the room and announce the new roster to everyone in
    /// it, the newcomer included.
    pub fn join(
        &mut self,
        connection_id: &ConnectionId,
        room_id: &str,
        display_name: &str,
    ) -> Result<Vec<Delivery>, SyncError> {
        if room_id.is_empty() {
            return Err(SyncError::EmptyRoomId);
        }

        self.registry.register(connection_id.clone(), display_name);
        self.directory.join(room_id, connection_id);

        let members = self.directory.members(room_id);
        let clients = self.roster(members);
        let joined = SendMessage::Joined(JoinedMessage {
            clients,
            display_name: display_name.to_string(),
            connection_id: connection_id.clone(),
        });

        Ok(members
            .iter()
            .map(|member| Delivery::new(member.clone(), joined.clone()))
            .collect())
    }

    /// Overwrite a slot and forward the new text to every other member of the room.
    pub fn edit(
        &mut self,
        connection_id: &ConnectionId,
        room_id: &str,
        language: &str,
        code: String,
    ) -> Result<Vec<Delivery>, SyncError> {
        let language: LanguageTag = language.parse()?;
        self.ensure_member(connection_id, room_id)?;

        self.documents.set(room_id, language, code.clone());

        let update = SendMessage::CodeChange(CodeUpdateMessage { language, code });
        Ok(self
            .directory
            .members(room_id)
            .iter()
            .filter(|member| *member != connection_id)
            .map(|member| Delivery::new(member.clone(), update.clone()))
            .collect())
    }

    /// Send the current text of all three slots to `target`, which must be in the room.
    pub fn sync_request(
        &self,
        connection_id: &ConnectionId,
        room_id: &str,
        target: &ConnectionId,
    ) -> Result<Vec<Delivery>, SyncError> {
        self.ensure_member(connection_id, room_id)?;
        if !self.directory.is_member(room_id, target) {
            return Err(SyncError::TargetNotInRoom {
                target: target.clone(),
                room: room_id.to_string(),
            });
        }

        Ok(LanguageTag::ALL
            .iter()
            .map(|language| {
                let update = SendMessage::CodeChange(CodeUpdateMessage {
                    language: *language,
                    code: self.documents.get(room_id, *language).to_string(),
                });
                Delivery::new(target.clone(), update)
            })
            .collect())
    }

    /// Tell the other members of every room the connection is in that it left, then forget it.
    /// Notifications are built before the registry record goes away since they carry its name.
    pub fn disconnecting(&mut self, connection_id: &ConnectionId) -> Vec<Delivery> {
        let rooms = self.directory.rooms_containing(connection_id);
        let display_name = self
            .registry
            .display_name_of(connection_id)
            .unwrap_or_default()
            .to_string();

        // A peer sharing several rooms with the leaver is told once.
        let mut notified = HashSet::new();
        let mut recipients = Vec::new();
        for room_id in &rooms {
            for member in self.directory.members(room_id) {
                if member != connection_id && notified.insert(member) {
                    recipients.push(member.clone());
                }
            }
        }

        let left = SendMessage::Disconnected(DisconnectedMessage {
            connection_id: connection_id.clone(),
            display_name,
        });
        let deliveries: Vec<Delivery> = recipients
            .into_iter()
            .map(|member| Delivery::new(member, left.clone()))
            .collect();

        self.registry.remove(connection_id);

        for room_id in &rooms {
            if self.directory.leave(room_id, connection_id) {
                if self.retain_documents {
                    debug!("Room '{}' is empty, keeping its documents", room_id);
                } else {
                    self.documents.remove_room(room_id);
                    debug!("Room '{}' is empty, reclaimed", room_id);
                }
            }
        }

        deliveries
    }

    /// Roster and documents of a room, or None if the room holds neither.
    pub fn room_snapshot(&self, room_id: &str) -> Option<RoomResponse> {
        let members = self.directory.members(room_id);
        if members.is_empty() && !self.documents.contains_room(room_id) {
            return None;
        }

        Some(RoomResponse {
            room_id: room_id.to_string(),
            clients: self.roster(members),
            documents: LanguageTag::ALL
                .iter()
                .map(|language| DocumentSlot {
                    language: *language,
                    code: self.documents.get(room_id, *language).to_string(),
                })
                .collect(),
        })
    }

    pub fn stats(&self) -> EngineStats {
        EngineStats {
            participants: self.registry.len(),
            rooms: self.directory.room_count(),
            document_rooms: self.documents.room_count(),
        }
    }

    fn roster(&self, members: &[ConnectionId]) -> Vec<ClientInfo> {
        members
            .iter()
            .filter_map(|member| {
                self.registry.display_name_of(member).map(|name| ClientInfo {
                    connection_id: member.clone(),
                    display_name: name.to_string(),
                })
            })
            .collect()
    }

    fn ensure_member(&self, connection_id: &ConnectionId, room_id: &str) -> Result<(), SyncError> {
        if room_id.is_empty() {
            return Err(SyncError::EmptyRoomId);
        }
        if self.registry.display_name_of(connection_id).is_none() {
            return Err(SyncError::NotJoined(connection_id.clone()));
        }
        if !self.directory.is_member(room_id, connection_id) {
            return Err(SyncError::NotMember {
                connection: connection_id.clone(),
                room: room_id.to_string(),
            });
        }
        Ok(())
    }
}

/// Process-wide synchronization engine shared by all connection tasks.
pub struct SyncEngine {
    state: Mutex<SyncState>,
    outbox: Arc<Outbox>,
}

impl SyncEngine {
    pub fn new(outbox: Arc<Outbox>, retain_documents: bool) -> Self {
        Self {
            state: Mutex::new(SyncState::new(retain_documents)),
            outbox,
        }
    }

    pub fn outbox(&self) -> &Arc<Outbox> {
        &self.outbox
    }

    /// Returns how many JOINED notifications were queued.
    pub async fn join(&self, connection_id: &ConnectionId, room_id: &str, display_name: &str) -> Result<usize, SyncError> {
        let mut state = self.state.lock().await;
        let deliveries = state.join(connection_id, room_id, display_name)?;
        info!("{} ({}) joined room '{}'", display_name, connection_id, room_id);
        Ok(self.outbox.dispatch(deliveries).await)
    }

    pub async fn edit(&self, connection_id: &ConnectionId, room_id: &str, language: &str, code: String) -> Result<usize, SyncError> {
        let mut state = self.state.lock().await;
        let deliveries = state.edit(connection_id, room_id, language, code)?;
        debug!("Connection {} updated {} in room '{}'", connection_id, language, room_id);
        Ok(self.outbox.dispatch(deliveries).await)
    }

    pub async fn sync_request(&self, connection_id: &ConnectionId, room_id: &str, target: &ConnectionId) -> Result<usize, SyncError> {
        let state = self.state.lock().await;
        let deliveries = state.sync_request(connection_id, room_id, target)?;
        debug!("Connection {} synced room '{}' to {}", connection_id, room_id, target);
        Ok(self.outbox.dispatch(deliveries).await)
    }

    /// Runs the full leave sequence and closes the connection's outbound queue.
    pub async fn disconnecting(&self, connection_id: &ConnectionId) -> usize {
        let queued = {
            let mut state = self.state.lock().await;
            let deliveries = state.disconnecting(connection_id);
            self.outbox.dispatch(deliveries).await
        };
        self.outbox.unregister(connection_id).await;
        info!("Connection {} disconnected, notified {} peers", connection_id, queued);
        queued
    }

    /// Report a protocol violation to the offending connection only.
    pub async fn reject(&self, connection_id: &ConnectionId, err: &SyncError) {
        warn!("Rejected event from connection {}: {}", connection_id, err);
        let message = SendMessage::Error(ErrorMessage::from(err));
        if !self.outbox.send(connection_id, message).await {
            debug!("Could not report violation to connection {}", connection_id);
        }
    }

    pub async fn room_snapshot(&self, room_id: &str) -> Option<RoomResponse> {
        self.state.lock().await.room_snapshot(room_id)
    }

    pub async fn stats(&self) -> EngineStats {
        self.state.lock().await.stats()
    }
}
