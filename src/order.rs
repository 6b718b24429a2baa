//! Total orderings over filtered results and windowed pagination.

use std::cmp::Reverse;

use crate::types::{ResourceRecord, SortKey};

/// Page size used by the catalog browsing surface.
pub const BROWSE_PAGE_SIZE: usize = 24;

/// Sort records in place. All three orderings are stable, so ties keep
/// their relative input order.
///
/// `name` orders case-insensitively ascending by title; a proper locale
/// collator is out of proportion for catalogs this size.
pub fn sort_records(records: &mut [&ResourceRecord], key: SortKey) {
    match key {
        SortKey::Name => records.sort_by_cached_key(|record| record.title.to_lowercase()),
        SortKey::Downloads => records.sort_by_key(|record| Reverse(record.downloads())),
        SortKey::Recent => records.sort_by_key(|record| Reverse(record.created_at)),
    }
}

/// 1-indexed window into `items`. Page zero clamps to the first page; a
/// page beyond the range yields an empty window, not an error.
#[must_use]
pub fn paginate<T>(items: &[T], page: usize, page_size: usize) -> &[T] {
    if page_size == 0 {
        return &items[..0];
    }
    let page = page.max(1);
    let start = (page - 1).saturating_mul(page_size);
    if start >= items.len() {
        return &items[..0];
    }
    let end = (start + page_size).min(items.len());
    &items[start..end]
}

/// Number of pages needed to show `total` items.
#[must_use]
pub fn page_count(total: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    total.div_ceil(page_size)
}
