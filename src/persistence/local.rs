//! LocalStorage backend (WASM only)

use super::KeyValueStore;
use crate::error::{Result, ShelfError};

/// Browser LocalStorage. Holds `None` when storage is disabled (private
/// mode, blocked cookies); every operation then degrades to a no-op.
#[derive(Clone)]
pub struct LocalStore {
    storage: Option<web_sys::Storage>,
}

impl LocalStore {
    pub fn open() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();
        if storage.is_none() {
            log::warn!("LocalStorage unavailable, state will not persist");
        }
        Self { storage }
    }
}

impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.as_ref()?.get_item(key).ok()?
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let storage = self
            .storage
            .as_ref()
            .ok_or_else(|| ShelfError::Storage("no LocalStorage".into()))?;
        storage
            .set_item(key, value)
            .map_err(|e| ShelfError::Storage(format!("{e:?}")))
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = &self.storage {
            let _ = storage.remove_item(key);
        }
    }
}
