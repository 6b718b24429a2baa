//! Applies a [`FilterState`] to a catalog snapshot.

use crate::catalog::CatalogSnapshot;
use crate::search::{FuzzyIndex, MIN_QUERY_LEN};
use crate::types::{FilterState, ResourceRecord};

/// Filter pipeline bound to one catalog snapshot. The fuzzy index is built
/// over the full catalog once per engine; construct a fresh engine when the
/// snapshot changes.
pub struct FilterEngine<'a> {
    snapshot: &'a CatalogSnapshot,
    index: FuzzyIndex,
}

impl<'a> FilterEngine<'a> {
    #[must_use]
    pub fn new(snapshot: &'a CatalogSnapshot) -> Self {
        Self {
            snapshot,
            index: FuzzyIndex::build(snapshot.records()),
        }
    }

    /// Apply the filter state and return the surviving records.
    ///
    /// When a query is present, relevance is ranked over the full catalog
    /// and the type/category predicates are re-applied as a post-filter on
    /// the ranked output, so search ordering survives narrowing instead of
    /// being destroyed by filtering first. Without a query, records keep
    /// their original catalog order. An empty result is a valid outcome.
    #[must_use]
    pub fn apply(&self, state: &FilterState) -> Vec<&'a ResourceRecord> {
        let records = self.snapshot.records();
        let query = state.search_query.trim();

        let ordered: Vec<&ResourceRecord> = if query.chars().count() >= MIN_QUERY_LEN {
            self.index
                .search(query)
                .into_iter()
                .map(|index| &records[index])
                .collect()
        } else {
            records.iter().collect()
        };

        ordered
            .into_iter()
            .filter(|record| state.type_filter.matches(record.resource_type))
            .filter(|record| state.category.is_empty() || record.category == state.category)
            .collect()
    }
}
