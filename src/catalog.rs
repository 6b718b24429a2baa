//! Catalog loading and the process-wide memoized snapshot.
//!
//! The catalog is produced by an external indexing pipeline as a JSON
//! document; this module trusts its shape, loads it once, and serves pure
//! lookups over the resulting immutable snapshot.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::types::{ResourceRecord, ResourceType};

/// Errors raised while loading a catalog. These are fatal for the operation
/// that needed the catalog: a missing or malformed document must fail loudly
/// rather than degrade to an empty browsing experience.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog at {path}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("catalog at {path} is malformed")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("catalog contains duplicate slug '{slug}'")]
    DuplicateSlug { slug: String },
}

/// Wire shape of the externally produced catalog document.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CatalogDocument {
    resources: Vec<ResourceRecord>,
    #[serde(default)]
    categories: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    generated_at: Option<DateTime<Utc>>,
}

/// Immutable view of one loaded catalog: the records in document order plus
/// the sorted distinct categories observed per type. Replaced wholesale on
/// rebuild, never patched in place.
#[derive(Debug)]
pub struct CatalogSnapshot {
    records: Vec<ResourceRecord>,
    categories: BTreeMap<ResourceType, Vec<String>>,
    generated_at: Option<DateTime<Utc>>,
}

impl CatalogSnapshot {
    /// Build a snapshot straight from records, deriving the per-type
    /// category lists. Rejects duplicate slugs.
    pub fn from_records(records: Vec<ResourceRecord>) -> Result<Self, CatalogError> {
        Self::assemble(records, &BTreeMap::new(), None)
    }

    fn from_document(document: CatalogDocument) -> Result<Self, CatalogError> {
        let CatalogDocument {
            resources,
            categories,
            generated_at,
        } = document;
        Self::assemble(resources, &categories, generated_at)
    }

    fn assemble(
        records: Vec<ResourceRecord>,
        declared: &BTreeMap<String, Vec<String>>,
        generated_at: Option<DateTime<Utc>>,
    ) -> Result<Self, CatalogError> {
        let mut slugs = BTreeSet::new();
        for record in &records {
            if !slugs.insert(record.slug.as_str()) {
                return Err(CatalogError::DuplicateSlug {
                    slug: record.slug.clone(),
                });
            }
        }

        // Categories declared by the pipeline, supplemented with whatever the
        // records themselves carry. The same category string is tracked
        // separately per type.
        let mut categories: BTreeMap<ResourceType, BTreeSet<String>> = BTreeMap::new();
        for (label, names) in declared {
            if let Some(kind) = ResourceType::parse(label) {
                categories
                    .entry(kind)
                    .or_default()
                    .extend(names.iter().filter(|name| !name.is_empty()).cloned());
            }
        }
        for record in &records {
            if !record.category.is_empty() {
                categories
                    .entry(record.resource_type)
                    .or_default()
                    .insert(record.category.clone());
            }
        }

        Ok(Self {
            records,
            categories: categories
                .into_iter()
                .map(|(kind, names)| (kind, names.into_iter().collect()))
                .collect(),
            generated_at,
        })
    }

    #[must_use]
    pub fn records(&self) -> &[ResourceRecord] {
        &self.records
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[must_use]
    pub fn generated_at(&self) -> Option<DateTime<Utc>> {
        self.generated_at
    }

    #[must_use]
    pub fn get_by_slug(&self, slug: &str) -> Option<&ResourceRecord> {
        self.records.iter().find(|record| record.slug == slug)
    }

    #[must_use]
    pub fn get_by_type(&self, kind: ResourceType) -> Vec<&ResourceRecord> {
        self.records
            .iter()
            .filter(|record| record.resource_type == kind)
            .collect()
    }

    #[must_use]
    pub fn get_by_type_and_category(
        &self,
        kind: ResourceType,
        category: &str,
    ) -> Vec<&ResourceRecord> {
        self.records
            .iter()
            .filter(|record| record.resource_type == kind && record.category == category)
            .collect()
    }

    /// Sorted distinct categories observed for one type.
    #[must_use]
    pub fn categories_for(&self, kind: ResourceType) -> &[String] {
        self.categories.get(&kind).map_or(&[], Vec::as_slice)
    }

    /// Sorted distinct categories across every type.
    #[must_use]
    pub fn all_categories(&self) -> Vec<String> {
        let mut names: BTreeSet<&String> = BTreeSet::new();
        for list in self.categories.values() {
            names.extend(list);
        }
        names.into_iter().cloned().collect()
    }
}

/// Loads the catalog document at most once per store and hands out the
/// memoized snapshot. The write-once cell makes the "load once" contract
/// explicit: concurrent first accesses converge on a single parse result,
/// and tests construct fresh stores instead of sharing process globals.
#[derive(Debug)]
pub struct CatalogStore {
    path: PathBuf,
    cell: OnceLock<CatalogSnapshot>,
}

impl CatalogStore {
    #[must_use]
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cell: OnceLock::new(),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load (first call) or fetch (subsequent calls) the snapshot.
    pub fn snapshot(&self) -> Result<&CatalogSnapshot, CatalogError> {
        if let Some(snapshot) = self.cell.get() {
            debug!(path = %self.path.display(), "catalog cache hit");
            return Ok(snapshot);
        }
        let loaded = self.load()?;
        Ok(self.cell.get_or_init(|| loaded))
    }

    fn load(&self) -> Result<CatalogSnapshot, CatalogError> {
        let raw = fs::read_to_string(&self.path).map_err(|source| CatalogError::Unreadable {
            path: self.path.clone(),
            source,
        })?;
        let document: CatalogDocument =
            serde_json::from_str(&raw).map_err(|source| CatalogError::Malformed {
                path: self.path.clone(),
                source,
            })?;
        let snapshot = CatalogSnapshot::from_document(document)?;
        debug!(
            path = %self.path.display(),
            records = snapshot.len(),
            "catalog loaded"
        );
        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    use tempfile::NamedTempFile;

    const SAMPLE: &str = r#"{
        "resources": [
            {
                "slug": "pre-commit",
                "title": "Pre-commit Hook",
                "type": "command",
                "category": "git",
                "createdAt": "2024-05-01T12:00:00Z"
            },
            {
                "slug": "git-standards",
                "title": "Git Standards",
                "type": "rule",
                "category": "git",
                "createdAt": "2024-04-01T12:00:00Z"
            }
        ],
        "categories": { "command": ["git", "testing"] },
        "totalCount": 2,
        "generatedAt": "2024-05-02T00:00:00Z"
    }"#;

    fn write_catalog(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("temp file");
        file.write_all(contents.as_bytes()).expect("write catalog");
        file
    }

    #[test]
    fn snapshot_is_memoized_across_calls() {
        let file = write_catalog(SAMPLE);
        let store = CatalogStore::open(file.path());
        let first = store.snapshot().expect("load") as *const CatalogSnapshot;
        let second = store.snapshot().expect("cache hit") as *const CatalogSnapshot;
        assert_eq!(first, second);
    }

    #[test]
    fn lookups_filter_by_slug_type_and_category() {
        let file = write_catalog(SAMPLE);
        let store = CatalogStore::open(file.path());
        let snapshot = store.snapshot().expect("load");

        assert_eq!(snapshot.len(), 2);
        assert!(snapshot.get_by_slug("pre-commit").is_some());
        assert!(snapshot.get_by_slug("missing").is_none());
        assert_eq!(snapshot.get_by_type(ResourceType::Command).len(), 1);
        assert_eq!(
            snapshot
                .get_by_type_and_category(ResourceType::Rule, "git")
                .len(),
            1
        );
        assert!(
            snapshot
                .get_by_type_and_category(ResourceType::Rule, "testing")
                .is_empty()
        );
    }

    #[test]
    fn categories_merge_declared_and_observed() {
        let file = write_catalog(SAMPLE);
        let store = CatalogStore::open(file.path());
        let snapshot = store.snapshot().expect("load");

        assert_eq!(
            snapshot.categories_for(ResourceType::Command),
            ["git", "testing"]
        );
        assert_eq!(snapshot.categories_for(ResourceType::Rule), ["git"]);
        assert_eq!(snapshot.all_categories(), ["git", "testing"]);
    }

    #[test]
    fn missing_catalog_is_a_hard_error() {
        let store = CatalogStore::open("/nonexistent/catalog.json");
        assert!(matches!(
            store.snapshot(),
            Err(CatalogError::Unreadable { .. })
        ));
    }

    #[test]
    fn malformed_catalog_is_a_hard_error() {
        let file = write_catalog("{ not json");
        let store = CatalogStore::open(file.path());
        assert!(matches!(
            store.snapshot(),
            Err(CatalogError::Malformed { .. })
        ));
    }

    #[test]
    fn duplicate_slugs_are_rejected() {
        let file = write_catalog(
            r#"{"resources": [
                {"slug": "a", "title": "A", "type": "command", "createdAt": "2024-01-01T00:00:00Z"},
                {"slug": "a", "title": "A again", "type": "rule", "createdAt": "2024-01-01T00:00:00Z"}
            ]}"#,
        );
        let store = CatalogStore::open(file.path());
        assert!(matches!(
            store.snapshot(),
            Err(CatalogError::DuplicateSlug { .. })
        ));
    }
}
