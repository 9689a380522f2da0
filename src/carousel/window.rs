//! Windowed card rendering
//!
//! Only records within `radius` of the current index get a live visual
//! element. Elements are tracked by record id in an arena and reused across
//! syncs, so a single-step navigation touches O(1) elements regardless of how
//! large the filtered view is.

use std::collections::HashMap;

use crate::catalog::{Catalog, GameRecord};
use crate::filter::FilteredView;

use super::state::CarouselState;

/// Position label of a live card, a pure function of `index - current`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    Center,
    NearLeft,
    NearRight,
    FarLeft,
    FarRight,
    /// In the tree for transitions but not shown
    Hidden,
}

impl Slot {
    pub fn for_offset(offset: i64) -> Self {
        match offset {
            0 => Slot::Center,
            -1 => Slot::NearLeft,
            1 => Slot::NearRight,
            -2 => Slot::FarLeft,
            2 => Slot::FarRight,
            _ => Slot::Hidden,
        }
    }

    /// CSS class the stylesheet keys on
    pub fn class_name(&self) -> &'static str {
        match self {
            Slot::Center => "center",
            Slot::NearLeft => "near-left",
            Slot::NearRight => "near-right",
            Slot::FarLeft => "far-left",
            Slot::FarRight => "far-right",
            Slot::Hidden => "hidden",
        }
    }

    pub fn is_visible(&self) -> bool {
        !matches!(self, Slot::Hidden)
    }
}

/// Owner of the actual visual elements (the DOM in the browser)
pub trait CardHost {
    type Handle;

    /// Build a new element for `record`, tagged with its id
    fn create(&mut self, record: &GameRecord) -> Self::Handle;

    /// Insert (or move) `handle` before `before`; append when `None`
    fn insert_before(&mut self, handle: &Self::Handle, before: Option<&Self::Handle>);

    fn remove(&mut self, handle: Self::Handle);

    /// Apply the position label; `index` is the card's place in the view
    fn set_slot(&mut self, handle: &Self::Handle, slot: Slot, index: usize);
}

struct LiveCard<H> {
    id: String,
    index: usize,
    handle: H,
}

/// What a sync did, mostly for logging and tests
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncStats {
    pub created: usize,
    pub removed: usize,
    pub moved: usize,
}

/// Live cards ordered by their index in the filtered view
pub struct CarouselWindow<H> {
    live: Vec<LiveCard<H>>,
}

impl<H> Default for CarouselWindow<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> CarouselWindow<H> {
    pub fn new() -> Self {
        Self { live: Vec::new() }
    }

    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    /// Ids of live cards in view order
    pub fn live_ids(&self) -> impl Iterator<Item = &str> {
        self.live.iter().map(|c| c.id.as_str())
    }

    pub fn handle_for(&self, id: &str) -> Option<&H> {
        self.live.iter().find(|c| c.id == id).map(|c| &c.handle)
    }

    /// Drop every live card
    pub fn clear<C: CardHost<Handle = H>>(&mut self, host: &mut C) {
        for card in self.live.drain(..) {
            host.remove(card.handle);
        }
    }

    /// Reconcile live cards with the window around `state.current_index`.
    pub fn sync<C: CardHost<Handle = H>>(
        &mut self,
        catalog: &Catalog,
        view: &FilteredView,
        state: &CarouselState,
        host: &mut C,
    ) -> SyncStats {
        let mut stats = SyncStats::default();

        let Some((lo, hi)) = state.window(view.len()) else {
            stats.removed = self.live.len();
            self.clear(host);
            return stats;
        };

        let targets: Vec<(usize, &GameRecord)> = (lo..=hi)
            .filter_map(|i| view.get(catalog, i).map(|r| (i, r)))
            .collect();
        let wanted: HashMap<&str, usize> = targets
            .iter()
            .map(|&(i, r)| (r.id.as_str(), i))
            .collect();

        // Drop cards that left the window
        let mut kept = Vec::with_capacity(self.live.len());
        for mut card in self.live.drain(..) {
            match wanted.get(card.id.as_str()) {
                Some(&index) => {
                    card.index = index;
                    kept.push(card);
                }
                None => {
                    host.remove(card.handle);
                    stats.removed += 1;
                }
            }
        }
        self.live = kept;

        // A new ordering can leave survivors out of order; re-append them
        if !self.live.windows(2).all(|w| w[0].index < w[1].index) {
            self.live.sort_by_key(|c| c.index);
            for card in &self.live {
                host.insert_before(&card.handle, None);
            }
            stats.moved = self.live.len();
        }

        // Fill gaps, each before the first live card with a greater index
        for (index, record) in targets {
            if self.live.iter().any(|c| c.id == record.id) {
                continue;
            }
            let handle = host.create(record);
            let pos = self
                .live
                .iter()
                .position(|c| c.index > index)
                .unwrap_or(self.live.len());
            host.insert_before(&handle, self.live.get(pos).map(|c| &c.handle));
            self.live.insert(
                pos,
                LiveCard {
                    id: record.id.clone(),
                    index,
                    handle,
                },
            );
            stats.created += 1;
        }

        for card in &self.live {
            let offset = card.index as i64 - state.current_index as i64;
            host.set_slot(&card.handle, Slot::for_offset(offset), card.index);
        }

        if stats.created + stats.removed + stats.moved > 0 {
            log::debug!(
                "Carousel sync at {}: +{} -{} ~{}",
                state.current_index,
                stats.created,
                stats.removed,
                stats.moved
            );
        }
        stats
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::filter::{FilterCriteria, SortMode};
    use crate::wishlist::Wishlist;
    use proptest::prelude::*;

    /// Stand-in for the DOM: a flat child list of numbered elements
    #[derive(Default)]
    pub(crate) struct RecordingHost {
        next: u32,
        labels: HashMap<u32, String>,
        pub children: Vec<u32>,
        pub slots: HashMap<u32, Slot>,
        pub created: usize,
    }

    impl RecordingHost {
        pub fn child_ids(&self) -> Vec<String> {
            self.children.iter().map(|h| self.labels[h].clone()).collect()
        }

        pub fn slot_of(&self, id: &str) -> Option<Slot> {
            let (handle, _) = self.labels.iter().find(|(_, l)| l.as_str() == id)?;
            self.slots.get(handle).copied()
        }
    }

    impl CardHost for RecordingHost {
        type Handle = u32;

        fn create(&mut self, record: &GameRecord) -> u32 {
            self.next += 1;
            self.created += 1;
            self.labels.insert(self.next, record.id.clone());
            self.next
        }

        fn insert_before(&mut self, handle: &u32, before: Option<&u32>) {
            self.children.retain(|h| h != handle);
            let pos = before
                .and_then(|b| self.children.iter().position(|h| h == b))
                .unwrap_or(self.children.len());
            self.children.insert(pos, *handle);
        }

        fn remove(&mut self, handle: u32) {
            self.children.retain(|h| *h != handle);
            self.slots.remove(&handle);
            self.labels.remove(&handle);
        }

        fn set_slot(&mut self, handle: &u32, slot: Slot, _index: usize) {
            self.slots.insert(*handle, slot);
        }
    }

    fn catalog(n: usize) -> Catalog {
        Catalog::from_records(
            (0..n)
                .map(|i| {
                    let mut g = GameRecord::new(&format!("g{i:02}"), &format!("Game {i:02}"));
                    g.difficulty = (n - i) as f64 / n as f64 * 5.0;
                    g
                })
                .collect(),
        )
    }

    fn view(catalog: &Catalog, criteria: &FilterCriteria) -> FilteredView {
        FilteredView::compute(catalog, None, criteria, &Wishlist::new())
    }

    #[test]
    fn test_slot_labels() {
        assert_eq!(Slot::for_offset(0), Slot::Center);
        assert_eq!(Slot::for_offset(-1), Slot::NearLeft);
        assert_eq!(Slot::for_offset(2), Slot::FarRight);
        assert_eq!(Slot::for_offset(3), Slot::Hidden);
        assert_eq!(Slot::for_offset(-5), Slot::Hidden);
    }

    #[test]
    fn test_initial_window_and_step() {
        let catalog = catalog(20);
        let view = view(&catalog, &FilterCriteria::default());
        let mut state = CarouselState::new(5);
        let mut window = CarouselWindow::new();
        let mut host = RecordingHost::default();

        let stats = window.sync(&catalog, &view, &state, &mut host);
        assert_eq!(stats.created, 6);
        assert_eq!(host.child_ids().first().map(String::as_str), Some("g00"));
        assert_eq!(host.slot_of("g00"), Some(Slot::Center));
        assert_eq!(host.slot_of("g01"), Some(Slot::NearRight));
        assert_eq!(host.slot_of("g05"), Some(Slot::Hidden));

        // One step right: one card in, none out (window still reaches index 0)
        state.step(1, view.len());
        let stats = window.sync(&catalog, &view, &state, &mut host);
        assert_eq!(stats, SyncStats { created: 1, removed: 0, moved: 0 });

        // Far away: old cards recycled, order preserved
        state.set(12, view.len());
        window.sync(&catalog, &view, &state, &mut host);
        assert_eq!(
            host.child_ids(),
            (7..=17).map(|i| format!("g{i:02}")).collect::<Vec<_>>()
        );
        assert_eq!(host.slot_of("g12"), Some(Slot::Center));
        assert_eq!(host.slot_of("g10"), Some(Slot::FarLeft));
    }

    #[test]
    fn test_step_left_inserts_in_front() {
        let catalog = catalog(20);
        let view = view(&catalog, &FilterCriteria::default());
        let mut state = CarouselState::new(2);
        state.set(10, view.len());
        let mut window = CarouselWindow::new();
        let mut host = RecordingHost::default();
        window.sync(&catalog, &view, &state, &mut host);

        state.step(-1, view.len());
        let stats = window.sync(&catalog, &view, &state, &mut host);
        assert_eq!(stats, SyncStats { created: 1, removed: 1, moved: 0 });
        assert_eq!(host.child_ids(), vec!["g07", "g08", "g09", "g10", "g11"]);
    }

    #[test]
    fn test_resync_is_idempotent() {
        let catalog = catalog(8);
        let view = view(&catalog, &FilterCriteria::default());
        let state = CarouselState::new(5);
        let mut window = CarouselWindow::new();
        let mut host = RecordingHost::default();

        window.sync(&catalog, &view, &state, &mut host);
        let created = host.created;
        let stats = window.sync(&catalog, &view, &state, &mut host);
        assert_eq!(stats, SyncStats::default());
        assert_eq!(host.created, created);
    }

    #[test]
    fn test_reorder_moves_survivors() {
        let catalog = catalog(6);
        let mut window = CarouselWindow::new();
        let mut host = RecordingHost::default();
        let state = CarouselState::new(5);

        let by_name = view(&catalog, &FilterCriteria::default());
        window.sync(&catalog, &by_name, &state, &mut host);

        let by_difficulty = view(
            &catalog,
            &FilterCriteria {
                sort: SortMode::DifficultyAsc,
                ..Default::default()
            },
        );
        let stats = window.sync(&catalog, &by_difficulty, &state, &mut host);
        assert_eq!(stats.created, 0);
        assert_eq!(stats.moved, 6);
        assert_eq!(host.child_ids(), vec!["g05", "g04", "g03", "g02", "g01", "g00"]);
        assert_eq!(host.slot_of("g05"), Some(Slot::Center));
    }

    #[test]
    fn test_empty_view_clears() {
        let catalog = catalog(4);
        let mut window = CarouselWindow::new();
        let mut host = RecordingHost::default();
        let state = CarouselState::new(5);
        window.sync(&catalog, &view(&catalog, &FilterCriteria::default()), &state, &mut host);

        let none = view(
            &catalog,
            &FilterCriteria {
                search: "zzz".into(),
                ..Default::default()
            },
        );
        let stats = window.sync(&catalog, &none, &state, &mut host);
        assert_eq!(stats.removed, 4);
        assert!(host.children.is_empty());
        assert_eq!(window.live_count(), 0);
    }

    proptest! {
        #[test]
        fn prop_window_is_bounded(
            n in 0usize..40,
            radius in 0usize..6,
            moves in prop::collection::vec(-8i64..8, 1..20),
        ) {
            let catalog = catalog(n);
            let view = view(&catalog, &FilterCriteria::default());
            let mut state = CarouselState::new(radius);
            let mut window = CarouselWindow::new();
            let mut host = RecordingHost::default();

            for delta in moves {
                state.step(delta, view.len());
                window.sync(&catalog, &view, &state, &mut host);

                prop_assert!(window.live_count() <= 2 * radius + 1);
                prop_assert_eq!(host.children.len(), window.live_count());
                prop_assert!(view.is_empty() || state.current_index < view.len());
                for id in window.live_ids() {
                    prop_assert!(view.position_of(&catalog, id).is_some());
                }
                let ids = host.child_ids();
                let positions: Vec<usize> = ids
                    .iter()
                    .filter_map(|id| view.position_of(&catalog, id))
                    .collect();
                prop_assert!(positions.windows(2).all(|w| w[0] < w[1]));
            }
        }
    }
}
