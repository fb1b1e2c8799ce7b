use std::collections::{HashMap, HashSet};

use crate::models::{ConnectionId, RoomId};

/// Room membership, indexed both ways.
///
/// `rooms` keeps members in join order so every roster the engine builds is deterministic.
/// `memberships` is the reverse index used on disconnect. A room that loses its last member is
/// removed from both maps.
#[derive(Debug, Default)]
pub struct RoomDirectory {
    rooms: HashMap<RoomId, Vec<ConnectionId>>,
    memberships: HashMap<ConnectionId, HashSet<RoomId>>,
}

impl RoomDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a connection to a room, creating the room on first join.
    /// Returns false when the connection already was a member.
    pub fn join(&mut self, room_id: &str, connection_id: &ConnectionId) -> bool {
        let members = self.rooms.entry(room_id.to_string()).or_default();
        if members.contains(connection_id) {
            return false;
        }
        members.push(connection_id.clone());
        self.memberships
            .entry(connection_id.clone())
            .or_default()
            .insert(room_id.to_string());
        true
    }

    pub fn members(&self, room_id: &str) -> &[ConnectionId] {
        self.rooms.get(room_id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_member(&self, room_id: &str, connection_id: &ConnectionId) -> bool {
        self.memberships
            .get(connection_id)
            .is_some_and(|rooms| rooms.contains(room_id))
    }

    /// Remove a connection from a room. Returns true when this emptied and reclaimed the room.
    pub fn leave(&mut self, room_id: &str, connection_id: &ConnectionId) -> bool {
        let Some(members) = self.rooms.get_mut(room_id) else {
            return false;
        };
        let before = members.len();
        members.retain(|member| member != connection_id);
        if members.len() == before {
            return false;
        }

        if let Some(rooms) = self.memberships.get_mut(connection_id) {
            rooms.remove(room_id);
            if rooms.is_empty() {
                self.memberships.remove(connection_id);
            }
        }

        if members.is_empty() {
            self.rooms.remove(room_id);
            return true;
        }
        false
    }

    /// Rooms the connection currently belongs to, sorted.
    pub fn rooms_containing(&self, connection_id: &ConnectionId) -> Vec<RoomId> {
        let mut rooms: Vec<RoomId> = self
            .memberships
            .get(connection_id)
            .map(|rooms| rooms.iter().cloned().collect())
            .unwrap_or_default();
        rooms.sort();
        rooms
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn conn(id: &str) -> ConnectionId {
        ConnectionId::from(id)
    }

    #[test]
    fn join_creates_room_and_is_idempotent() {
        let mut dir = RoomDirectory::new();
        assert!(dir.join("r1", &conn("a")));
        assert!(!dir.join("r1", &conn("a")));
        assert!(dir.join("r1", &conn("b")));

        assert_eq!(dir.members("r1"), &[conn("a"), conn("b")]);
        assert_eq!(dir.room_count(), 1);
    }

    #[test]
    fn unknown_room_has_no_members() {
        let dir = RoomDirectory::new();
        assert!(dir.members("nowhere").is_empty());
        assert!(dir.rooms_containing(&conn("a")).is_empty());
    }

    #[test]
    fn leave_of_non_member_is_a_noop() {
        let mut dir = RoomDirectory::new();
        dir.join("r1", &conn("a"));

        assert!(!dir.leave("r1", &conn("b")));
        assert!(!dir.leave("r2", &conn("a")));
        assert_eq!(dir.members("r1"), &[conn("a")]);
        assert_eq!(dir.rooms_containing(&conn("a")), vec!["r1".to_string()]);
    }

    #[test]
    fn last_leave_reclaims_room() {
        let mut dir = RoomDirectory::new();
        dir.join("r1", &conn("a"));
        dir.join("r1", &conn("b"));

        assert!(!dir.leave("r1", &conn("a")));
        assert_eq!(dir.room_count(), 1);
        assert!(dir.leave("r1", &conn("b")));

        assert!(dir.members("r1").is_empty());
        assert_eq!(dir.room_count(), 0);
        assert!(!dir.is_member("r1", &conn("b")));
    }

    #[test]
    fn tracks_rooms_per_connection() {
        let mut dir = RoomDirectory::new();
        dir.join("r2", &conn("a"));
        dir.join("r1", &conn("a"));
        dir.join("r1", &conn("b"));

        assert_eq!(dir.rooms_containing(&conn("a")), vec!["r1".to_string(), "r2".to_string()]);
        assert_eq!(dir.rooms_containing(&conn("b")), vec!["r1".to_string()]);
        assert!(dir.is_member("r2", &conn("a")));
        assert!(!dir.is_member("r2", &conn("b")));
    }
}
