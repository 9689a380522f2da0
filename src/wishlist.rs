//! Wishlist tracker
//!
//! A persisted set of game ids. Only an explicit toggle changes it, except for
//! adopting a shared list from a link, which replaces it wholesale.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::persistence::{KeyValueStore, keys, load_json, save_json};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Wishlist {
    ids: BTreeSet<String>,
}

impl Wishlist {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            ids: ids
                .into_iter()
                .map(Into::into)
                .filter(|id: &String| !id.is_empty())
                .collect(),
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    /// Flip membership of `id`. Returns the new membership.
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.ids.remove(id) {
            false
        } else {
            self.ids.insert(id.to_string());
            true
        }
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Stored wishlist, empty when absent or unreadable
    pub fn load(store: &dyn KeyValueStore) -> Self {
        let wishlist: Self = load_json(store, keys::WISHLIST).unwrap_or_default();
        log::info!("Loaded wishlist with {} games", wishlist.len());
        wishlist
    }

    pub fn persist(&self, store: &dyn KeyValueStore) {
        save_json(store, keys::WISHLIST, self);
    }

    /// Toggle and persist in one step
    pub fn toggle_and_persist(&mut self, id: &str, store: &dyn KeyValueStore) -> bool {
        let wished = self.toggle(id);
        self.persist(store);
        log::info!("{} {} wishlist", id, if wished { "added to" } else { "removed from" });
        wished
    }

    /// Replace the local list with a shared one and persist it
    pub fn import_shared<I, S>(&mut self, ids: I, store: &dyn KeyValueStore)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let previous = self.len();
        *self = Self::from_ids(ids);
        self.persist(store);
        log::info!(
            "Adopted shared wishlist ({} games, replaced {})",
            self.len(),
            previous
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;

    #[test]
    fn test_toggle_twice_restores() {
        let mut wishlist = Wishlist::from_ids(["a"]);
        let before = wishlist.clone();
        assert!(wishlist.toggle("b"));
        assert!(!wishlist.toggle("b"));
        assert_eq!(wishlist, before);
    }

    #[test]
    fn test_import_shared_replaces_and_persists() {
        let store = MemoryStore::new();
        let mut wishlist = Wishlist::from_ids(["old"]);
        wishlist.persist(&store);

        wishlist.import_shared(["x", "y"], &store);
        let loaded = Wishlist::load(&store);
        assert_eq!(loaded, Wishlist::from_ids(["x", "y"]));
        assert!(!loaded.contains("old"));

        let mut loaded = loaded;
        loaded.toggle_and_persist("x", &store);
        assert_eq!(Wishlist::load(&store), Wishlist::from_ids(["y"]));
    }

    #[test]
    fn test_stored_as_json_array() {
        let store = MemoryStore::new();
        Wishlist::from_ids(["b", "a"]).persist(&store);
        assert_eq!(store.get(keys::WISHLIST).as_deref(), Some(r#"["a","b"]"#));
    }

    #[test]
    fn test_corrupt_store_loads_empty() {
        let store = MemoryStore::new();
        store.set(keys::WISHLIST, "[1, 2").unwrap();
        assert!(Wishlist::load(&store).is_empty());
    }
}
