//! Bounded local search history, persisted through the same key-value
//! backend as presets.

use tracing::warn;

use crate::storage::KvStore;

/// Maximum number of remembered queries.
pub const MAX_HISTORY: usize = 20;

const STORAGE_KEY: &str = "search-history";

/// Most-recent-first list of past search queries. Persistence is
/// best-effort; a corrupt or absent backing value degrades to empty.
pub struct SearchHistory<S: KvStore> {
    storage: S,
    entries: Vec<String>,
}

impl<S: KvStore> SearchHistory<S> {
    pub fn new(storage: S) -> Self {
        let entries = storage
            .get(STORAGE_KEY)
            .and_then(|raw| match serde_json::from_str::<Vec<String>>(&raw) {
                Ok(entries) => Some(entries),
                Err(err) => {
                    warn!(%err, "stored search history is corrupt; starting empty");
                    None
                }
            })
            .unwrap_or_default();
        Self { storage, entries }
    }

    /// Remember a query: deduplicated case-insensitively, newest first,
    /// capped at [`MAX_HISTORY`]. Blank queries are ignored.
    pub fn record(&mut self, query: &str) -> bool {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return true;
        }
        self.entries
            .retain(|entry| !entry.eq_ignore_ascii_case(trimmed));
        self.entries.insert(0, trimmed.to_string());
        self.entries.truncate(MAX_HISTORY);
        self.persist()
    }

    /// Up to `limit` most recent queries, newest first.
    #[must_use]
    pub fn recent(&self, limit: usize) -> &[String] {
        &self.entries[..limit.min(self.entries.len())]
    }

    pub fn clear(&mut self) -> bool {
        self.entries.clear();
        self.storage.remove(STORAGE_KEY)
    }

    fn persist(&mut self) -> bool {
        match serde_json::to_string(&self.entries) {
            Ok(json) => {
                let ok = self.storage.set(STORAGE_KEY, &json);
                if !ok {
                    warn!("failed to persist search history");
                }
                ok
            }
            Err(err) => {
                warn!(%err, "failed to serialize search history");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::storage::MemoryKvStore;

    #[test]
    fn records_are_newest_first_and_deduplicated() {
        let mut history = SearchHistory::new(MemoryKvStore::new());
        assert!(history.record("git hooks"));
        assert!(history.record("docker"));
        assert!(history.record("Git Hooks"));
        assert_eq!(history.recent(10), ["Git Hooks", "docker"]);
    }

    #[test]
    fn blank_queries_are_ignored() {
        let mut history = SearchHistory::new(MemoryKvStore::new());
        assert!(history.record("   "));
        assert!(history.recent(10).is_empty());
    }

    #[test]
    fn history_is_capped() {
        let mut history = SearchHistory::new(MemoryKvStore::new());
        for index in 0..(MAX_HISTORY + 5) {
            history.record(&format!("query {index}"));
        }
        assert_eq!(history.recent(100).len(), MAX_HISTORY);
        assert_eq!(history.recent(100)[0], format!("query {}", MAX_HISTORY + 4));
    }

    #[test]
    fn corrupt_backing_value_degrades_to_empty() {
        let mut backend = MemoryKvStore::new();
        backend.set(STORAGE_KEY, "not an array");
        let history = SearchHistory::new(backend);
        assert!(history.recent(10).is_empty());
    }

    #[test]
    fn clear_removes_the_backing_key() {
        let mut history = SearchHistory::new(MemoryKvStore::new());
        history.record("git");
        assert!(history.clear());
        assert!(history.recent(10).is_empty());
    }
}
