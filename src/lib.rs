//! In-memory faceted search core for a curated resources hub.
//!
//! The crate loads a JSON catalog once per process and serves fuzzy text
//! search, type/category filtering, live facet counts, sorting, pagination,
//! and shareable/persistable filter presets over the memoized snapshot.
//! The root module re-exports the types embedders need without digging
//! through the module hierarchy.

pub mod app_dirs;
pub mod catalog;
pub mod facets;
pub mod filter;
pub mod history;
pub mod order;
pub mod preset;
pub mod search;
pub mod storage;
pub mod types;

pub use catalog::{CatalogError, CatalogSnapshot, CatalogStore};
pub use facets::FacetCounts;
pub use filter::FilterEngine;
pub use history::SearchHistory;
pub use order::{BROWSE_PAGE_SIZE, page_count, paginate, sort_records};
pub use preset::{FilterPreset, MAX_USER_PRESETS, PresetError, PresetStore, PresetUpdate, codec};
pub use search::FuzzyIndex;
pub use storage::{FileKvStore, KvStore, MemoryKvStore};
pub use types::{FilterState, ResourceRecord, ResourceType, SortKey, TypeFilter};
