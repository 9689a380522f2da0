//! Grid views (bazaar and wishlist pages)
//!
//! Unlike the carousel these render the whole list at once. The same
//! [`CardView`] also feeds the carousel's card elements.

use crate::catalog::{Catalog, GameRecord, gradient_for, resolve_image};
use crate::consts::{EMPTY_RESULTS, EMPTY_WISHLIST};
use crate::links::detail_url;
use crate::wishlist::Wishlist;

/// Everything needed to draw one game card
#[derive(Debug, Clone, PartialEq)]
pub struct CardView {
    pub id: String,
    pub title: String,
    pub href: String,
    /// Resolved cover image; the gradient shows when absent or broken
    pub image: Option<String>,
    pub gradient: &'static str,
    pub icon: Option<String>,
    pub players: String,
    pub play_time: String,
    pub difficulty: String,
    pub wished: bool,
}

impl CardView {
    pub fn new(record: &GameRecord, wishlist: &Wishlist, image_dir: &str) -> Self {
        Self {
            id: record.id.clone(),
            title: record.title.clone(),
            href: detail_url(&record.id),
            image: record.cover_image().map(|i| resolve_image(i, image_dir)),
            gradient: gradient_for(&record.id),
            icon: record.icon.clone(),
            players: record.player_range_label(),
            play_time: record.play_time.clone(),
            difficulty: record.difficulty_label(),
            wished: wishlist.contains(&record.id),
        }
    }

    pub fn wish_symbol(&self) -> &'static str {
        wish_symbol(self.wished)
    }
}

pub fn wish_symbol(wished: bool) -> &'static str {
    if wished { "★" } else { "☆" }
}

#[derive(Debug, Clone, PartialEq)]
pub enum GridModel {
    Empty(&'static str),
    Cards(Vec<CardView>),
}

impl GridModel {
    pub fn len(&self) -> usize {
        match self {
            GridModel::Empty(_) => 0,
            GridModel::Cards(cards) => cards.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Grid for an already filtered list of records
pub fn bazaar_grid<'a, I>(records: I, wishlist: &Wishlist, image_dir: &str) -> GridModel
where
    I: IntoIterator<Item = &'a GameRecord>,
{
    let cards: Vec<CardView> = records
        .into_iter()
        .map(|r| CardView::new(r, wishlist, image_dir))
        .collect();
    if cards.is_empty() {
        GridModel::Empty(EMPTY_RESULTS)
    } else {
        GridModel::Cards(cards)
    }
}

/// Wished games in catalog order. Ids no longer in the catalog are skipped.
pub fn wishlist_grid(catalog: &Catalog, wishlist: &Wishlist, image_dir: &str) -> GridModel {
    let missing = wishlist.ids().filter(|id| !catalog.contains(id)).count();
    if missing > 0 {
        log::warn!("{missing} wishlist ids are not in the catalog");
    }
    let cards: Vec<CardView> = catalog
        .records()
        .iter()
        .filter(|r| wishlist.contains(&r.id))
        .map(|r| CardView::new(r, wishlist, image_dir))
        .collect();
    if cards.is_empty() {
        GridModel::Empty(EMPTY_WISHLIST)
    } else {
        GridModel::Cards(cards)
    }
}
