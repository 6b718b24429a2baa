use chrono::Utc;
use thiserror::Error;
use tracing::warn;

use crate::storage::KvStore;
use crate::types::FilterState;

use super::{FilterPreset, default_presets};

/// Maximum number of user-created presets. Built-in defaults do not count
/// against this bound.
pub const MAX_USER_PRESETS: usize = 10;

const STORAGE_KEY: &str = "filter-presets";

/// Errors surfaced to callers when mutating the preset collection.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PresetError {
    #[error("preset limit of {MAX_USER_PRESETS} reached; delete one before saving another")]
    CapacityExceeded,
}

/// Partial update applied to a user preset. Fields left as `None` keep
/// their current value.
#[derive(Debug, Clone, Default)]
pub struct PresetUpdate {
    pub name: Option<String>,
    pub filter: Option<FilterState>,
    pub is_starred: Option<bool>,
}

/// Persisted collection of filter presets.
///
/// Built-in defaults are synthesized at construction and always listed
/// first; only user presets are persisted, bounded, and mutable. All
/// persistence is best-effort: a failed write is logged and reported as
/// `false` without rolling back the in-memory state for this session.
pub struct PresetStore<S: KvStore> {
    storage: S,
    defaults: Vec<FilterPreset>,
    user: Vec<FilterPreset>,
}

impl<S: KvStore> PresetStore<S> {
    /// Load the store from its backend. A corrupt or absent collection
    /// degrades to empty, never an error.
    pub fn new(storage: S) -> Self {
        let user = storage
            .get(STORAGE_KEY)
            .and_then(|raw| match serde_json::from_str::<Vec<FilterPreset>>(&raw) {
                Ok(presets) => Some(presets),
                Err(err) => {
                    warn!(%err, "stored presets are corrupt; starting empty");
                    None
                }
            })
            .unwrap_or_default();
        Self {
            storage,
            defaults: default_presets(),
            user,
        }
    }

    /// Every preset, defaults first.
    #[must_use]
    pub fn list(&self) -> Vec<&FilterPreset> {
        self.defaults.iter().chain(self.user.iter()).collect()
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&FilterPreset> {
        self.defaults
            .iter()
            .chain(self.user.iter())
            .find(|preset| preset.id == id)
    }

    #[must_use]
    pub fn user_len(&self) -> usize {
        self.user.len()
    }

    /// Save a new user preset. Rejected with a capacity error once
    /// [`MAX_USER_PRESETS`] presets exist.
    pub fn save(&mut self, name: &str, filter: FilterState) -> Result<FilterPreset, PresetError> {
        if self.user.len() >= MAX_USER_PRESETS {
            return Err(PresetError::CapacityExceeded);
        }
        let preset = FilterPreset {
            id: self.next_id(),
            name: name.trim().to_string(),
            filter,
            created_at: Utc::now(),
            last_used: None,
            usage_count: 0,
            is_default: false,
            is_starred: false,
        };
        self.user.push(preset.clone());
        self.persist();
        Ok(preset)
    }

    /// Delete a user preset. Defaults are filtered out of the deletable set
    /// unconditionally, so deleting one is a successful no-op; the returned
    /// flag reports whether the surviving collection was persisted.
    pub fn delete(&mut self, id: &str) -> bool {
        let before = self.user.len();
        self.user.retain(|preset| preset.id != id);
        if self.user.len() == before {
            return true;
        }
        self.persist()
    }

    /// Apply a partial update to a user preset. Defaults and unknown ids
    /// report `false`; an update that was applied but not persisted also
    /// reports `false`, with the in-memory change kept for this session.
    pub fn update(&mut self, id: &str, fields: PresetUpdate) -> bool {
        let Some(preset) = self.user.iter_mut().find(|preset| preset.id == id) else {
            return false;
        };
        if let Some(name) = fields.name {
            preset.name = name;
        }
        if let Some(filter) = fields.filter {
            preset.filter = filter;
        }
        if let Some(starred) = fields.is_starred {
            preset.is_starred = starred;
        }
        self.persist()
    }

    /// Bump the usage counter and stamp the last-used time, tracked for
    /// future most-used surfacing. Reports whether the bump was persisted;
    /// the in-memory counter advances either way.
    pub fn record_usage(&mut self, id: &str) -> bool {
        let Some(preset) = self.user.iter_mut().find(|preset| preset.id == id) else {
            return false;
        };
        preset.usage_count += 1;
        preset.last_used = Some(Utc::now());
        self.persist()
    }

    fn next_id(&self) -> String {
        let mut stamp = Utc::now().timestamp_millis();
        loop {
            let id = format!("preset-{stamp}");
            if self.user.iter().all(|preset| preset.id != id) {
                return id;
            }
            stamp += 1;
        }
    }

    fn persist(&mut self) -> bool {
        match serde_json::to_string(&self.user) {
            Ok(json) => {
                let ok = self.storage.set(STORAGE_KEY, &json);
                if !ok {
                    warn!("failed to persist filter presets");
                }
                ok
            }
            Err(err) => {
                warn!(%err, "failed to serialize filter presets");
                false
            }
        }
    }
}
