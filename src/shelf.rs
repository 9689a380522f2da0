//! Listing page controller
//!
//! Owns every piece of listing state (catalog, criteria, filtered view,
//! carousel index, gesture state, wishlist) and keeps them consistent:
//! criteria changes recompute the view and restart at the first card, index
//! changes are saved right away, wishlist toggles leave the position alone.
//! The browser layer forwards events here and redraws from the accessors.

use crate::carousel::{
    CardHost, CarouselState, CarouselWindow, ClickAction, GestureOutcome, Indicator, NavCommand,
    NavControls, Navigator, SyncStats,
};
use crate::catalog::{Catalog, GameRecord};
use crate::config::ShelfConfig;
use crate::filter::{FilterCriteria, FilteredView, SortMode};
use crate::persistence::{KeyValueStore, PersistedViewState};
use crate::timing::FrameThrottle;
use crate::wishlist::Wishlist;

pub struct Shelf<S: KeyValueStore> {
    config: ShelfConfig,
    catalog: Catalog,
    /// Catalog indices shuffled once at load, used by the random sort
    shuffled: Vec<usize>,
    criteria: FilterCriteria,
    view: FilteredView,
    carousel: CarouselState,
    navigator: Navigator,
    wishlist: Wishlist,
    store: S,
    source_path: String,
    scroll_offset: f64,
    scroll_frame: FrameThrottle<f64>,
}

impl<S: KeyValueStore> Shelf<S> {
    pub fn new(catalog: Catalog, config: ShelfConfig, store: S, source_path: &str, seed: u64) -> Self {
        let wishlist = Wishlist::load(&store);
        let shuffled = catalog.shuffled_order(seed);
        let navigator = Navigator::new(config.gesture, seed.wrapping_add(1));
        let mut shelf = Self {
            carousel: CarouselState::new(config.window_radius),
            config,
            catalog,
            shuffled,
            criteria: FilterCriteria::default(),
            view: FilteredView::default(),
            navigator,
            wishlist,
            store,
            source_path: source_path.to_string(),
            scroll_offset: 0.0,
            scroll_frame: FrameThrottle::new(),
        };
        shelf.recompute();
        log::info!(
            "Shelf ready on {}: {} games",
            shelf.source_path,
            shelf.catalog.len()
        );
        shelf
    }

    // === Accessors ===

    pub fn config(&self) -> &ShelfConfig {
        &self.config
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn view(&self) -> &FilteredView {
        &self.view
    }

    pub fn carousel(&self) -> &CarouselState {
        &self.carousel
    }

    pub fn wishlist(&self) -> &Wishlist {
        &self.wishlist
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    pub fn navigator_mut(&mut self) -> &mut Navigator {
        &mut self.navigator
    }

    pub fn scroll_offset(&self) -> f64 {
        self.scroll_offset
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Filtered records in display order
    pub fn records(&self) -> impl Iterator<Item = &GameRecord> + '_ {
        self.view.records(&self.catalog)
    }

    /// Record under the center card
    pub fn current(&self) -> Option<&GameRecord> {
        self.view.get(&self.catalog, self.carousel.current_index)
    }

    pub fn indicator(&self) -> Indicator {
        Indicator::for_view(&self.carousel, self.view.len(), self.config.dot_cap)
    }

    pub fn controls(&self) -> NavControls {
        NavControls::for_view(&self.carousel, self.view.len())
    }

    // === Criteria ===

    fn recompute(&mut self) {
        let order = (self.criteria.sort == SortMode::Random).then_some(self.shuffled.as_slice());
        self.view = FilteredView::compute(&self.catalog, order, &self.criteria, &self.wishlist);
        self.carousel.clamp(self.view.len());
    }

    /// Replace the criteria. The old index means nothing in the new
    /// ordering, so the carousel restarts at 0.
    pub fn set_criteria(&mut self, criteria: FilterCriteria) {
        self.criteria = criteria;
        self.recompute();
        self.carousel.reset();
        log::debug!("Criteria changed: {} results", self.view.len());
        self.save_view_state();
    }

    /// Update one control (`players`, `genre`, ...). False for an unknown
    /// key or value, in which case nothing changes.
    pub fn update_criterion(&mut self, key: &str, value: &str) -> bool {
        let mut criteria = self.criteria.clone();
        if !criteria.set(key, value) {
            log::warn!("Ignoring filter {key}={value}");
            return false;
        }
        self.set_criteria(criteria);
        true
    }

    /// Back to first-visit state: default criteria, nothing persisted
    pub fn reset(&mut self) {
        self.criteria = FilterCriteria::default();
        self.recompute();
        self.carousel.reset();
        self.scroll_offset = 0.0;
        self.scroll_frame.take();
        PersistedViewState::clear(&self.store);
    }

    // === Persistence ===

    pub fn snapshot(&self) -> PersistedViewState {
        PersistedViewState {
            criteria: self.criteria.clone(),
            current_index: self.carousel.current_index,
            scroll_offset: self.scroll_offset,
            source_path: self.source_path.clone(),
        }
    }

    pub fn save_view_state(&self) {
        self.snapshot().save(&self.store);
    }

    /// Apply the saved state for this page, if any. Returns the scroll
    /// offset to restore.
    pub fn restore(&mut self) -> Option<f64> {
        let saved = PersistedViewState::load_for(&self.store, &self.source_path)?;
        self.criteria = saved.criteria;
        self.recompute();
        self.carousel.set(saved.current_index, self.view.len());
        self.scroll_offset = saved.scroll_offset.max(0.0);
        log::info!(
            "Restored view state: index {} of {}",
            self.carousel.current_index,
            self.view.len()
        );
        Some(self.scroll_offset)
    }

    /// Note a scroll position. True when the caller must request an
    /// animation frame that later calls [`Shelf::flush_scroll`].
    pub fn record_scroll(&mut self, offset: f64) -> bool {
        self.scroll_frame.push(offset)
    }

    /// Frame callback: save the latest scroll position, once
    pub fn flush_scroll(&mut self) {
        if let Some(offset) = self.scroll_frame.take() {
            self.scroll_offset = offset;
            self.save_view_state();
        }
    }

    // === Navigation ===

    /// Run a navigation command; the new index is saved immediately.
    pub fn navigate(&mut self, command: NavCommand, now: f64) -> bool {
        let changed = self
            .navigator
            .apply(&mut self.carousel, command, self.view.len());
        if command == NavCommand::Random {
            if let Some(id) = self.current().map(|r| r.id.clone()) {
                self.navigator.start_highlight(&id, now);
            }
        }
        if changed {
            self.save_view_state();
        }
        changed
    }

    /// Pointer released after a drag
    pub fn release(&mut self, x: f64, now: f64) -> Option<GestureOutcome> {
        let outcome = self.navigator.release(x, now)?;
        if let GestureOutcome::Swipe(steps) = outcome {
            self.navigate(NavCommand::Swipe(steps), now);
        }
        Some(outcome)
    }

    /// Click on the card at view index `index`
    pub fn click(&mut self, index: usize, now: f64) -> ClickAction {
        let action = self.navigator.click(index, &self.carousel, now);
        if let ClickAction::Jump(target) = action {
            self.navigate(NavCommand::Jump(target), now);
        }
        action
    }

    pub fn sync_window<C: CardHost>(
        &self,
        window: &mut CarouselWindow<C::Handle>,
        host: &mut C,
    ) -> SyncStats {
        window.sync(&self.catalog, &self.view, &self.carousel, host)
    }

    // === Wishlist ===

    /// Flip membership. The carousel keeps its index; with the wishlist-only
    /// filter on the view shrinks or grows and the index is only clamped.
    pub fn toggle_wishlist(&mut self, id: &str) -> bool {
        let wished = self.wishlist.toggle_and_persist(id, &self.store);
        if self.criteria.wishlist_only {
            self.recompute();
            self.save_view_state();
        }
        wished
    }

    /// Adopt a shared list, replacing the local one
    pub fn import_shared<I>(&mut self, ids: I)
    where
        I: IntoIterator<Item = String>,
    {
        self.wishlist.import_shared(ids, &self.store);
        if self.criteria.wishlist_only {
            self.recompute();
            self.save_view_state();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::carousel::window::tests::RecordingHost;
    use crate::filter::{DifficultyBucket, PlayerCount};
    use crate::persistence::MemoryStore;
    use proptest::prelude::*;

    fn game(id: &str, title: &str, min: u32, max: u32, difficulty: f64, time: &str) -> GameRecord {
        let mut g = GameRecord::new(id, title);
        g.min_players = min;
        g.max_players = max;
        g.difficulty = difficulty;
        g.play_time = time.into();
        g
    }

    fn catalog(n: usize) -> Catalog {
        Catalog::from_records(
            (0..n)
                .map(|i| game(&format!("g{i:02}"), &format!("Game {i:02}"), 1, 4, (i % 5) as f64, "45"))
                .collect(),
        )
    }

    fn shelf(n: usize) -> Shelf<MemoryStore> {
        Shelf::new(catalog(n), ShelfConfig::default(), MemoryStore::new(), "/index.html", 7)
    }

    #[test]
    fn test_two_player_scenario() {
        let catalog = Catalog::from_records(vec![
            game("a", "Catan", 3, 4, 2.5, "60-90"),
            game("b", "Chess", 2, 2, 4.5, "30"),
        ]);
        let mut shelf = Shelf::new(catalog, ShelfConfig::default(), MemoryStore::new(), "/", 1);
        assert!(shelf.update_criterion("players", "2"));
        assert_eq!(shelf.criteria().player_count, PlayerCount::Exactly(2));
        let titles: Vec<&str> = shelf.records().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["Chess"]);

        assert!(shelf.update_criterion("difficulty", "hard"));
        assert!(shelf.view().is_empty());
        assert_eq!(shelf.carousel().current_index, 0);
        assert_eq!(shelf.indicator(), Indicator::None);
    }

    #[test]
    fn test_criteria_change_resets_index() {
        let mut shelf = shelf(20);
        shelf.navigate(NavCommand::Jump(9), 0.0);
        assert_eq!(shelf.carousel().current_index, 9);
        shelf.update_criterion("sort", "difficulty-desc");
        assert_eq!(shelf.carousel().current_index, 0);
        assert!(!shelf.update_criterion("bogus", "1"));
    }

    #[test]
    fn test_wishlist_toggle_keeps_index() {
        let mut shelf = shelf(20);
        shelf.navigate(NavCommand::Jump(6), 0.0);
        let before = shelf.wishlist().clone();
        assert!(shelf.toggle_wishlist("g03"));
        assert!(!shelf.toggle_wishlist("g03"));
        assert_eq!(shelf.wishlist(), &before);
        assert_eq!(shelf.carousel().current_index, 6);
    }

    #[test]
    fn test_wishlist_only_clamps() {
        let mut shelf = shelf(10);
        shelf.toggle_wishlist("g01");
        shelf.toggle_wishlist("g02");
        shelf.update_criterion("wishlist", "true");
        assert_eq!(shelf.view().len(), 2);
        shelf.navigate(NavCommand::Next, 0.0);
        assert_eq!(shelf.carousel().current_index, 1);
        shelf.toggle_wishlist("g02");
        assert_eq!(shelf.view().len(), 1);
        assert_eq!(shelf.carousel().current_index, 0);
        let stored = PersistedViewState::load_for(shelf.store(), "/index.html").unwrap();
        assert_eq!(stored.current_index, 0);

        shelf.import_shared(vec!["g05".to_string(), "g06".to_string(), "g07".to_string()]);
        shelf.navigate(NavCommand::Jump(2), 0.0);
        shelf.import_shared(vec!["g05".to_string()]);
        assert_eq!(shelf.carousel().current_index, 0);
        let stored = PersistedViewState::load_for(shelf.store(), "/index.html").unwrap();
        assert_eq!(stored.current_index, 0);
    }

    #[test]
    fn test_index_saved_and_restored() {
        let store = MemoryStore::new();
        let mut first = Shelf::new(catalog(12), ShelfConfig::default(), store, "/index.html", 3);
        first.update_criterion("difficulty", "easy");
        first.navigate(NavCommand::Next, 0.0);
        first.record_scroll(120.0);
        assert!(!first.record_scroll(240.0));
        first.flush_scroll();
        let saved = first.snapshot();

        let Shelf { store, .. } = first;
        let mut second = Shelf::new(catalog(12), ShelfConfig::default(), store, "/index.html", 3);
        assert_eq!(second.restore(), Some(240.0));
        assert_eq!(second.criteria().difficulty, DifficultyBucket::Easy);
        assert_eq!(second.carousel().current_index, 1);
        assert_eq!(second.snapshot(), saved);

        let Shelf { store, .. } = second;
        let mut other = Shelf::new(catalog(12), ShelfConfig::default(), store, "/bazaar.html", 3);
        assert_eq!(other.restore(), None);
    }

    #[test]
    fn test_reset_clears_persisted_state() {
        let mut shelf = shelf(8);
        shelf.update_criterion("search", "game 0");
        shelf.navigate(NavCommand::Next, 0.0);
        shelf.reset();
        assert_eq!(shelf.criteria(), &FilterCriteria::default());
        assert_eq!(shelf.carousel().current_index, 0);
        assert_eq!(PersistedViewState::load(shelf.store()), None);
        assert_eq!(shelf.restore(), None);
    }

    #[test]
    fn test_drag_and_click() {
        let mut shelf = shelf(10);
        shelf.navigate(NavCommand::Jump(3), 0.0);
        shelf.navigator_mut().drag.pointer_down(500.0);
        assert_eq!(shelf.release(180.0, 1000.0), Some(GestureOutcome::Swipe(2)));
        assert_eq!(shelf.carousel().current_index, 5);

        assert_eq!(shelf.click(7, 1100.0), ClickAction::Suppress);
        assert_eq!(shelf.click(7, 2000.0), ClickAction::Jump(7));
        assert_eq!(shelf.carousel().current_index, 7);
        assert_eq!(shelf.click(7, 2100.0), ClickAction::Follow);
    }

    #[test]
    fn test_random_highlights_center() {
        let mut shelf = shelf(10);
        shelf.navigate(NavCommand::Random, 100.0);
        let current = shelf.current().map(|r| r.id.clone());
        let highlighted = shelf.navigator().highlight(200.0).map(|h| h.id.clone());
        assert_eq!(highlighted, current);
    }

    #[test]
    fn test_random_sort_uses_load_order() {
        let mut shelf = shelf(15);
        shelf.update_criterion("sort", "random");
        let first: Vec<String> = shelf.records().map(|r| r.id.clone()).collect();
        shelf.update_criterion("players", "2");
        let second: Vec<String> = shelf.records().map(|r| r.id.clone()).collect();
        assert_eq!(first, second);
        let mut sorted = first.clone();
        sorted.sort();
        assert_ne!(first, sorted);
    }

    #[test]
    fn test_window_follows_navigation() {
        let mut shelf = shelf(30);
        let mut host = RecordingHost::default();
        let mut window = CarouselWindow::new();
        shelf.sync_window(&mut window, &mut host);
        assert_eq!(window.live_count(), 6);
        shelf.navigate(NavCommand::Jump(15), 0.0);
        shelf.sync_window(&mut window, &mut host);
        assert_eq!(window.live_count(), 11);
        shelf.update_criterion("search", "game 2");
        shelf.sync_window(&mut window, &mut host);
        assert_eq!(window.live_count(), shelf.view().len().min(6));
    }

    proptest! {
        #[test]
        fn prop_index_always_in_bounds(
            ops in proptest::collection::vec((0u8..6, 0usize..40, -6i64..6), 1..40)
        ) {
            let mut shelf = shelf(25);
            for (kind, n, steps) in ops {
                match kind {
                    0 => { shelf.navigate(NavCommand::Swipe(steps), 0.0); }
                    1 => { shelf.navigate(NavCommand::Jump(n), 0.0); }
                    2 => { shelf.navigate(NavCommand::Random, 0.0); }
                    3 => { shelf.update_criterion("search", &format!("game {}", n % 3)); }
                    4 => { shelf.update_criterion("players", &(n % 6).to_string()); }
                    _ => { shelf.toggle_wishlist(&format!("g{:02}", n % 25)); }
                }
                let len = shelf.view().len();
                if len == 0 {
                    prop_assert_eq!(shelf.carousel().current_index, 0);
                } else {
                    prop_assert!(shelf.carousel().current_index < len);
                }
            }
        }
    }
}
