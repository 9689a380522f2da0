//! Durable local persistence
//!
//! Key/value blobs (JSON) for the wishlist, the listing view-state and the
//! pending-edits log. Reads never fail: a missing medium or malformed content
//! is simply "absent". Writes log and carry on.

pub mod pending;
pub mod view_state;

#[cfg(target_arch = "wasm32")]
pub mod local;

use std::cell::RefCell;
use std::collections::HashMap;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::Result;

pub use pending::{PendingEdit, PendingEdits};
pub use view_state::PersistedViewState;

#[cfg(target_arch = "wasm32")]
pub use local::LocalStore;

/// Storage keys
pub mod keys {
    pub const WISHLIST: &str = "board_shelf_wishlist";
    pub const VIEW_STATE: &str = "board_shelf_view_state";
    pub const PENDING_EDITS: &str = "board_shelf_pending_edits";
    pub const CONFIG: &str = "board_shelf_config";
}

/// Minimal string key/value medium (LocalStorage on web)
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str);
}

/// In-memory store, used natively and in tests
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) {
        self.items.borrow_mut().remove(key);
    }
}

/// Read and decode a JSON blob, treating anything unreadable as absent
pub fn load_json<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Option<T> {
    let json = store.get(key)?;
    match serde_json::from_str(&json) {
        Ok(value) => Some(value),
        Err(e) => {
            log::warn!("Ignoring malformed {key}: {e}");
            None
        }
    }
}

/// Encode and write a JSON blob; failures are logged, never returned
pub fn save_json<T: Serialize>(store: &dyn KeyValueStore, key: &str, value: &T) {
    let json = match serde_json::to_string(value) {
        Ok(json) => json,
        Err(e) => {
            log::warn!("Could not encode {key}: {e}");
            return;
        }
    };
    if let Err(e) = store.set(key, &json) {
        log::warn!("Could not save {key}: {e}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_blob_is_absent() {
        let store = MemoryStore::new();
        store.set("k", "{not json").unwrap();
        assert_eq!(load_json::<Vec<String>>(&store, "k"), None);
        assert_eq!(load_json::<Vec<String>>(&store, "missing"), None);
    }

    #[test]
    fn test_round_trip_blob() {
        let store = MemoryStore::new();
        save_json(&store, "k", &vec!["a".to_string()]);
        assert_eq!(
            load_json::<Vec<String>>(&store, "k"),
            Some(vec!["a".to_string()])
        );
        store.remove("k");
        assert_eq!(store.get("k"), None);
    }
}
