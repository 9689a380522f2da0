//! Runtime configuration
//!
//! Defaults come from [`crate::consts`]. A JSON override can be stored in
//! LocalStorage; missing fields keep their defaults.

use serde::{Deserialize, Serialize};

use crate::carousel::GestureConfig;
use crate::consts::*;
use crate::persistence::{KeyValueStore, keys, load_json};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ShelfConfig {
    // === Carousel ===
    /// Cards kept live on each side of the current one
    pub window_radius: usize,
    pub gesture: GestureConfig,
    /// Above this many results the indicator switches from dots to "i / n"
    pub dot_cap: usize,

    // === Filtering ===
    pub search_debounce_ms: f64,
    /// Player count offered as "N+"
    pub many_players: u32,

    // === Assets ===
    pub image_dir: String,
    pub placeholder_image: String,

    // === Remote store ===
    pub project_id: String,
    pub games_collection: String,
    pub reviews_collection: String,
}

impl Default for ShelfConfig {
    fn default() -> Self {
        Self {
            window_radius: WINDOW_RADIUS,
            gesture: GestureConfig::default(),
            dot_cap: DOT_CAP,

            search_debounce_ms: SEARCH_DEBOUNCE_MS,
            many_players: MANY_PLAYERS,

            image_dir: IMAGE_DIR.to_string(),
            placeholder_image: PLACEHOLDER_IMAGE.to_string(),

            project_id: PROJECT_ID.to_string(),
            games_collection: GAMES_COLLECTION.to_string(),
            reviews_collection: REVIEWS_COLLECTION.to_string(),
        }
    }
}

impl ShelfConfig {
    pub fn load_from(store: &dyn KeyValueStore) -> Self {
        match load_json(store, keys::CONFIG) {
            Some(config) => {
                log::info!("Loaded config override");
                config
            }
            None => Self::default(),
        }
    }

    /// Load config from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        Self::load_from(&crate::persistence::LocalStore::open())
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}
