//! Board Shelf entry point
//!
//! The browser build starts from `wasm_main`. The native binary is a small
//! inspection tool: it filters a catalog JSON export and prints the result.
//!
//! ```text
//! board-shelf games.json players=4 sort=difficulty-asc
//! ```

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    board_shelf::web::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Board Shelf (native) starting...");

    let mut args = std::env::args().skip(1);
    let Some(path) = args.next() else {
        eprintln!("usage: board-shelf <catalog.json> [key=value ...]");
        eprintln!("keys: players genre time difficulty search sort wishlist");
        std::process::exit(2);
    };

    if let Err(e) = native::list(&path, args) {
        log::error!("{e}");
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::time::{SystemTime, UNIX_EPOCH};

    use board_shelf::persistence::MemoryStore;
    use board_shelf::{Catalog, Result, Shelf, ShelfConfig};

    pub fn list(path: &str, args: impl Iterator<Item = String>) -> Result<()> {
        let json = std::fs::read_to_string(path)?;
        let catalog = Catalog::from_json(&json)?;
        log::info!("Loaded {} games from {path}", catalog.len());

        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or_default();
        let mut shelf = Shelf::new(catalog, ShelfConfig::default(), MemoryStore::new(), path, seed);

        for arg in args {
            let (key, value) = arg.split_once('=').unwrap_or((arg.as_str(), ""));
            if !shelf.update_criterion(key, value) {
                log::warn!("Ignoring unknown filter `{key}`");
            }
        }

        let shown = shelf.view().len();
        println!("{} of {} games", shown, shelf.catalog().len());
        for (i, game) in shelf.records().enumerate() {
            println!(
                "{:>3}. {}  [{} players, {}, difficulty {}]",
                i + 1,
                game.title,
                game.player_range_label(),
                if game.play_time.is_empty() { "-" } else { game.play_time.as_str() },
                game.difficulty_label(),
            );
        }
        Ok(())
    }
}
