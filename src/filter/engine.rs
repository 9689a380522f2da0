//! Filtering predicate and ordering

use std::cmp::Ordering;

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use super::criteria::{FilterCriteria, SortMode};
use crate::catalog::GameRecord;
use crate::wishlist::Wishlist;

/// Filter then sort. Pure in its inputs; never fails.
pub fn apply<'a, I>(records: I, criteria: &FilterCriteria, wishlist: &Wishlist) -> Vec<&'a GameRecord>
where
    I: IntoIterator<Item = &'a GameRecord>,
{
    let search = criteria.search_key();
    let mut kept: Vec<&GameRecord> = records
        .into_iter()
        .filter(|g| matches_with(g, criteria, &search, wishlist))
        .collect();

    // Stable, so random mode keeps the shuffled source order
    kept.sort_by(|a, b| compare(a, b, criteria.sort, &search));
    kept
}

/// Does `game` pass every active predicate?
pub fn matches(game: &GameRecord, criteria: &FilterCriteria, wishlist: &Wishlist) -> bool {
    matches_with(game, criteria, &criteria.search_key(), wishlist)
}

fn matches_with(game: &GameRecord, criteria: &FilterCriteria, search: &str, wishlist: &Wishlist) -> bool {
    if !search.is_empty() && !game.title.to_lowercase().contains(search) {
        return false;
    }
    if !criteria.player_count.matches(game) {
        return false;
    }
    if let Some(genre) = &criteria.genre {
        if game.genre.as_deref() != Some(genre.as_str()) {
            return false;
        }
    }
    if !criteria.time.matches(game) {
        return false;
    }
    if !criteria.difficulty.matches(game) {
        return false;
    }
    if criteria.wishlist_only && !wishlist.contains(&game.id) {
        return false;
    }
    true
}

fn compare(a: &GameRecord, b: &GameRecord, sort: SortMode, search: &str) -> Ordering {
    // Titles starting with the search text come first
    if !search.is_empty() {
        let pa = a.title.to_lowercase().starts_with(search);
        let pb = b.title.to_lowercase().starts_with(search);
        if pa != pb {
            return pb.cmp(&pa);
        }
    }

    match sort {
        SortMode::Name => collate(&a.title, &b.title),
        SortMode::DifficultyAsc => difficulty(a)
            .total_cmp(&difficulty(b))
            .then_with(|| collate(&a.title, &b.title)),
        SortMode::DifficultyDesc => difficulty(b)
            .total_cmp(&difficulty(a))
            .then_with(|| collate(&a.title, &b.title)),
        SortMode::Random => Ordering::Equal,
    }
}

fn difficulty(game: &GameRecord) -> f64 {
    if game.difficulty.is_finite() {
        game.difficulty
    } else {
        0.0
    }
}

/// Title collation: accents and case folded first, then by exact text so the
/// order is total. Hangul decomposes into jamo that keep dictionary order.
pub fn collate(a: &str, b: &str) -> Ordering {
    fold(a).cmp(&fold(b)).then_with(|| a.cmp(b))
}

fn fold(title: &str) -> String {
    title
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}
