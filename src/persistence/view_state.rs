//! Listing view-state that survives reloads and back-navigation

use serde::{Deserialize, Serialize};

use super::{KeyValueStore, keys, load_json, save_json};
use crate::filter::FilterCriteria;

/// Snapshot of the listing page: filters, carousel position, scroll offset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedViewState {
    pub criteria: FilterCriteria,
    pub current_index: usize,
    #[serde(default)]
    pub scroll_offset: f64,
    /// Page the snapshot was taken on
    pub source_path: String,
}

impl PersistedViewState {
    pub fn new(source_path: &str) -> Self {
        Self {
            criteria: FilterCriteria::default(),
            current_index: 0,
            scroll_offset: 0.0,
            source_path: source_path.to_string(),
        }
    }

    /// Stored snapshot, if any. Corrupt content reads as absent.
    pub fn load(store: &dyn KeyValueStore) -> Option<Self> {
        load_json(store, keys::VIEW_STATE)
    }

    /// Stored snapshot only when it was taken on `path`
    pub fn load_for(store: &dyn KeyValueStore, path: &str) -> Option<Self> {
        let state = Self::load(store)?;
        if state.source_path == path {
            Some(state)
        } else {
            log::debug!(
                "Ignoring view state from {} on {}",
                state.source_path,
                path
            );
            None
        }
    }

    pub fn save(&self, store: &dyn KeyValueStore) {
        save_json(store, keys::VIEW_STATE, self);
    }

    /// Explicit reset: the next load behaves like a first visit
    pub fn clear(store: &dyn KeyValueStore) {
        store.remove(keys::VIEW_STATE);
        log::info!("View state cleared");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{DifficultyBucket, SortMode};
    use crate::persistence::MemoryStore;

    #[test]
    fn test_save_load_clear() {
        let store = MemoryStore::new();
        assert_eq!(PersistedViewState::load(&store), None);

        let mut state = PersistedViewState::new("/index.html");
        state.criteria.difficulty = DifficultyBucket::Hard;
        state.criteria.sort = SortMode::DifficultyDesc;
        state.current_index = 4;
        state.scroll_offset = 320.5;
        state.save(&store);

        assert_eq!(PersistedViewState::load(&store), Some(state.clone()));
        assert_eq!(
            PersistedViewState::load_for(&store, "/index.html"),
            Some(state)
        );
        assert_eq!(PersistedViewState::load_for(&store, "/wishlist.html"), None);

        PersistedViewState::clear(&store);
        assert_eq!(PersistedViewState::load(&store), None);
    }

    #[test]
    fn test_corrupt_state_reads_as_absent() {
        let store = MemoryStore::new();
        store
            .set(keys::VIEW_STATE, r#"{"criteria": 12, "currentIndex": "x"}"#)
            .unwrap();
        assert_eq!(PersistedViewState::load(&store), None);
    }
}
