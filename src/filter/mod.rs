//! Filter/sort engine
//!
//! Pure derivation of the ordered, filtered subset of the catalog. The result
//! is the index space the carousel navigates, so it is recomputed wholesale on
//! every criteria change and never patched incrementally.

pub mod criteria;
pub mod engine;

pub use criteria::{DifficultyBucket, FilterCriteria, PlayerCount, SortMode, TimeBucket};
pub use engine::{apply, collate, matches};

use crate::catalog::{Catalog, GameRecord};
use crate::wishlist::Wishlist;

/// Ordered subset of the catalog, stored as load-order indices
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilteredView {
    indices: Vec<usize>,
}

impl FilteredView {
    /// Run the engine over `catalog`, visiting records in `order` when given
    /// (the shuffled order for random sort) and load order otherwise.
    pub fn compute(
        catalog: &Catalog,
        order: Option<&[usize]>,
        criteria: &FilterCriteria,
        wishlist: &Wishlist,
    ) -> Self {
        let records: Vec<&GameRecord> = match order {
            Some(order) => order.iter().filter_map(|&i| catalog.record_at(i)).collect(),
            None => catalog.records().iter().collect(),
        };
        let indices = apply(records, criteria, wishlist)
            .into_iter()
            .filter_map(|r| catalog.index_of(&r.id))
            .collect();
        Self { indices }
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn get<'a>(&self, catalog: &'a Catalog, position: usize) -> Option<&'a GameRecord> {
        catalog.record_at(*self.indices.get(position)?)
    }

    /// Position of a record id within the view
    pub fn position_of(&self, catalog: &Catalog, id: &str) -> Option<usize> {
        let index = catalog.index_of(id)?;
        self.indices.iter().position(|&i| i == index)
    }

    pub fn records<'a>(&'a self, catalog: &'a Catalog) -> impl Iterator<Item = &'a GameRecord> + 'a {
        self.indices.iter().filter_map(|&i| catalog.record_at(i))
    }
}
