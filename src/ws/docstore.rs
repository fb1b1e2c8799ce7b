use std::collections::HashMap;

use crate::models::{LanguageTag, RoomId};

/// Latest text per (room, language). Writes overwrite, nothing is merged and no history is kept.
#[derive(Debug, Default)]
pub struct DocumentStore {
    rooms: HashMap<RoomId, HashMap<LanguageTag, String>>,
}

impl DocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored text, or the empty string for a slot nobody wrote yet.
    pub fn get(&self, room_id: &str, language: LanguageTag) -> &str {
        self.rooms
            .get(room_id)
            .and_then(|slots| slots.get(&language))
            .map(String::as_str)
            .unwrap_or("")
    }

    pub fn set(&mut self, room_id: &str, language: LanguageTag, text: String) {
        self.rooms
            .entry(room_id.to_string())
            .or_default()
            .insert(language, text);
    }

    pub fn contains_room(&self, room_id: &str) -> bool {
        self.rooms.contains_key(room_id)
    }

    /// Drop every slot of a room. Returns whether anything was stored.
    pub fn remove_room(&mut self, room_id: &str) -> bool {
        self.rooms.remove(room_id).is_some()
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_slot_reads_empty() {
        let store = DocumentStore::new();
        assert_eq!(store.get("r1", LanguageTag::Markup), "");
        assert!(!store.contains_room("r1"));
    }

    #[test]
    fn last_write_wins() {
        let mut store = DocumentStore::new();
        store.set("r1", LanguageTag::Script, "let a = 1;".to_string());
        store.set("r1", LanguageTag::Script, "let b = 2;".to_string());

        assert_eq!(store.get("r1", LanguageTag::Script), "let b = 2;");
        assert_eq!(store.get("r1", LanguageTag::Style), "");
        assert_eq!(store.get("r2", LanguageTag::Script), "");
    }

    #[test]
    fn remove_room_drops_all_slots() {
        let mut store = DocumentStore::new();
        store.set("r1", LanguageTag::Markup, "<p></p>".to_string());
        store.set("r1", LanguageTag::Style, "p {}".to_string());
        store.set("r2", LanguageTag::Style, "a {}".to_string());

        assert!(store.remove_room("r1"));
        assert!(!store.remove_room("r1"));
        assert_eq!(store.get("r1", LanguageTag::Markup), "");
        assert_eq!(store.room_count(), 1);
    }
}
