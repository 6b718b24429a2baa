//! Saved filter presets: the wire/persisted shape, built-in defaults, the
//! URL-safe token codec, and the bounded persisted store.

pub mod codec;
mod store;

pub use store::{MAX_USER_PRESETS, PresetError, PresetStore, PresetUpdate};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{FilterState, SortKey, TypeFilter};

/// A named, saved combination of filter-state values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterPreset {
    pub id: String,
    pub name: String,
    #[serde(flatten)]
    pub filter: FilterState,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_used: Option<DateTime<Utc>>,
    #[serde(default)]
    pub usage_count: u64,
    #[serde(default)]
    pub is_default: bool,
    #[serde(default)]
    pub is_starred: bool,
}

/// Built-in presets synthesized at load time. Never persisted, never
/// deletable, and their filter fields are not editable.
pub(crate) fn default_presets() -> Vec<FilterPreset> {
    let stamp = Utc::now();
    let built_in = |id: &str, name: &str, filter: FilterState| FilterPreset {
        id: id.to_string(),
        name: name.to_string(),
        filter,
        created_at: stamp,
        last_used: None,
        usage_count: 0,
        is_default: true,
        is_starred: false,
    };

    vec![
        built_in("default-all", "All resources", FilterState::default()),
        built_in(
            "default-commands",
            "Commands",
            FilterState {
                type_filter: TypeFilter::Command,
                ..FilterState::default()
            },
        ),
        built_in(
            "default-recent",
            "Recently added",
            FilterState {
                sort_by: SortKey::Recent,
                ..FilterState::default()
            },
        ),
        built_in(
            "default-popular",
            "Most downloaded",
            FilterState {
                sort_by: SortKey::Downloads,
                ..FilterState::default()
            },
        ),
    ]
}
