//! Append-only log of proposed corrections
//!
//! Visitors can suggest a best player count for a game. Suggestions are kept
//! locally and reconciled by hand later.

use serde::{Deserialize, Serialize};

use super::{KeyValueStore, keys, load_json, save_json};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingEdit {
    pub id: String,
    pub best_players: u32,
    /// Unix timestamp (ms)
    pub timestamp: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PendingEdits {
    pub entries: Vec<PendingEdit>,
}

impl PendingEdits {
    pub fn load(store: &dyn KeyValueStore) -> Self {
        load_json::<Vec<PendingEdit>>(store, keys::PENDING_EDITS)
            .map(|entries| Self { entries })
            .unwrap_or_default()
    }

    /// Append one suggestion and persist the whole log
    pub fn append(store: &dyn KeyValueStore, edit: PendingEdit) -> Self {
        let mut log = Self::load(store);
        log::info!(
            "Pending edit for {}: best players {}",
            edit.id,
            edit.best_players
        );
        log.entries.push(edit);
        save_json(store, keys::PENDING_EDITS, &log.entries);
        log
    }

    /// Latest suggestion for a game, if any
    pub fn latest_for(&self, id: &str) -> Option<&PendingEdit> {
        self.entries.iter().rev().find(|e| e.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;

    #[test]
    fn test_append_only() {
        let store = MemoryStore::new();
        PendingEdits::append(
            &store,
            PendingEdit {
                id: "a".into(),
                best_players: 3,
                timestamp: 1.0,
            },
        );
        let log = PendingEdits::append(
            &store,
            PendingEdit {
                id: "a".into(),
                best_players: 4,
                timestamp: 2.0,
            },
        );
        assert_eq!(log.entries.len(), 2);
        assert_eq!(PendingEdits::load(&store), log);
        assert_eq!(log.latest_for("a").map(|e| e.best_players), Some(4));
        assert!(log.latest_for("b").is_none());
    }
}
