//! Board Shelf - browser for a personal board-game collection
//!
//! Core modules:
//! - `catalog`: Game records loaded once per session, image/gradient assets
//! - `filter`: Filter criteria and the pure filter/sort engine
//! - `carousel`: Windowed single-card view, gestures, position indicator
//! - `shelf`: Listing controller tying the state objects together
//! - `persistence`: LocalStorage-backed wishlist, view state and edit log
//! - `firestore`: Remote document store codec
//! - `web`: DOM wiring (wasm only)

pub mod carousel;
pub mod catalog;
pub mod config;
pub mod detail;
pub mod error;
pub mod filter;
pub mod firestore;
pub mod grid;
pub mod links;
pub mod persistence;
pub mod reviews;
pub mod shelf;
pub mod timing;
pub mod wishlist;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use catalog::{Catalog, GameRecord};
pub use config::ShelfConfig;
pub use error::{Result, ShelfError};
pub use filter::{FilterCriteria, FilteredView};
pub use shelf::Shelf;
pub use wishlist::Wishlist;

/// Shelf configuration constants
pub mod consts {
    /// Live cards on each side of the center card
    pub const WINDOW_RADIUS: usize = 5;

    /// Drag distance below which a release is a tap (px)
    pub const SWIPE_THRESHOLD_PX: f64 = 30.0;
    /// Drag distance per card (px)
    pub const SWIPE_PX_PER_STEP: f64 = 150.0;
    /// Click swallowed this long after a drag (ms)
    pub const CLICK_COOLDOWN_MS: f64 = 300.0;
    /// Random-pick highlight duration (ms)
    pub const HIGHLIGHT_MS: f64 = 1500.0;

    /// Quiet period before a search re-filters (ms)
    pub const SEARCH_DEBOUNCE_MS: f64 = 200.0;
    /// Most dots the indicator draws before switching to "i / n"
    pub const DOT_CAP: usize = 15;
    /// Player select tops out at "7+"
    pub const MANY_PLAYERS: u32 = 7;

    /// Asset locations
    pub const IMAGE_DIR: &str = "assets/images/games/";
    pub const PLACEHOLDER_IMAGE: &str = "assets/images/placeholder.png";

    /// Remote store
    pub const PROJECT_ID: &str = "boardame-ee082";
    pub const GAMES_COLLECTION: &str = "games";
    pub const REVIEWS_COLLECTION: &str = "reviews";

    /// UI text
    pub const SITE_TITLE: &str = "내 보드게임 컬렉션";
    pub const EMPTY_RESULTS: &str = "조건에 맞는 게임이 없습니다.";
    pub const EMPTY_WISHLIST: &str = "위시리스트가 비어 있습니다.";
    pub const NOT_FOUND: &str = "게임을 찾을 수 없습니다.";
    pub const LOAD_FAILED: &str = "게임 목록을 불러오지 못했습니다. 잠시 후 다시 시도해주세요.";
    pub const SHARED_TITLE_SUFFIX: &str = "님의 위시리스트";
    pub const REVIEW_SAVE_FAILED: &str = "리뷰를 저장하지 못했습니다.";
    pub const REVIEW_DELETE_FAILED: &str = "리뷰를 삭제하지 못했습니다.";
    pub const WRONG_PASSWORD: &str = "비밀번호가 일치하지 않습니다.";
    pub const LINK_COPIED: &str = "공유 링크가 복사되었습니다.";
}
