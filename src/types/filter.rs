use serde::{Deserialize, Serialize};

use super::ResourceType;

/// Type dimension of a filter: everything, or one specific resource type.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum TypeFilter {
    #[default]
    All,
    Command,
    Rule,
    Mcp,
    Hook,
}

impl TypeFilter {
    #[must_use]
    pub fn matches(self, kind: ResourceType) -> bool {
        match self.as_type() {
            None => true,
            Some(wanted) => wanted == kind,
        }
    }

    /// The concrete type this filter narrows to, or `None` for `all`.
    #[must_use]
    pub fn as_type(self) -> Option<ResourceType> {
        match self {
            Self::All => None,
            Self::Command => Some(ResourceType::Command),
            Self::Rule => Some(ResourceType::Rule),
            Self::Mcp => Some(ResourceType::Mcp),
            Self::Hook => Some(ResourceType::Hook),
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self.as_type() {
            None => "all",
            Some(kind) => kind.as_str(),
        }
    }

    /// Parse a type label; anything unrecognized reads as `None`.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        if value.trim().eq_ignore_ascii_case("all") {
            return Some(Self::All);
        }
        ResourceType::parse(value).map(Self::from)
    }
}

impl From<ResourceType> for TypeFilter {
    fn from(kind: ResourceType) -> Self {
        match kind {
            ResourceType::Command => Self::Command,
            ResourceType::Rule => Self::Rule,
            ResourceType::Mcp => Self::Mcp,
            ResourceType::Hook => Self::Hook,
        }
    }
}

/// Total ordering applied to filtered results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Name,
    Downloads,
    Recent,
}

impl SortKey {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Downloads => "downloads",
            Self::Recent => "recent",
        }
    }

    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "name" => Some(Self::Name),
            "downloads" => Some(Self::Downloads),
            "recent" => Some(Self::Recent),
            _ => None,
        }
    }
}

/// The filter tuple threaded through the filter engine, the preset codec and
/// the preset store. Empty strings mean "unset"; every field has a schema
/// default so absent wire fields decode to the default, not an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    #[serde(rename = "type", default)]
    pub type_filter: TypeFilter,
    #[serde(default)]
    pub category: String,
    #[serde(rename = "searchQuery", default)]
    pub search_query: String,
    #[serde(rename = "sortBy", default)]
    pub sort_by: SortKey,
}

impl FilterState {
    /// True when no predicate narrows the catalog.
    #[must_use]
    pub fn is_identity(&self) -> bool {
        self.type_filter == TypeFilter::All
            && self.category.is_empty()
            && self.search_query.trim().is_empty()
    }

    /// Rebuild a filter state from URL query pairs (`q`, `type`, `category`,
    /// `sort`). Absent or unrecognized values mean "default", never an error.
    pub fn from_query_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut state = Self::default();
        for (key, value) in pairs {
            match key {
                "q" => state.search_query = value.trim().to_string(),
                "type" => {
                    if let Some(filter) = TypeFilter::parse(value) {
                        state.type_filter = filter;
                    }
                }
                "category" => state.category = value.trim().to_string(),
                "sort" => {
                    if let Some(sort) = SortKey::parse(value) {
                        state.sort_by = sort;
                    }
                }
                _ => {}
            }
        }
        state
    }

    /// Emit the non-default fields as URL query pairs.
    #[must_use]
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        let query = self.search_query.trim();
        if !query.is_empty() {
            pairs.push(("q", query.to_string()));
        }
        if self.type_filter != TypeFilter::All {
            pairs.push(("type", self.type_filter.as_str().to_string()));
        }
        if !self.category.is_empty() {
            pairs.push(("category", self.category.clone()));
        }
        if self.sort_by != SortKey::default() {
            pairs.push(("sort", self.sort_by.as_str().to_string()));
        }
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_state_is_identity() {
        assert!(FilterState::default().is_identity());
        let narrowed = FilterState {
            category: "git".to_string(),
            ..FilterState::default()
        };
        assert!(!narrowed.is_identity());
    }

    #[test]
    fn type_filter_matches_each_kind() {
        assert!(TypeFilter::All.matches(ResourceType::Mcp));
        assert!(TypeFilter::Rule.matches(ResourceType::Rule));
        assert!(!TypeFilter::Rule.matches(ResourceType::Hook));
    }

    #[test]
    fn query_pairs_round_trip() {
        let state = FilterState {
            type_filter: TypeFilter::Mcp,
            category: "web".to_string(),
            search_query: "search tool".to_string(),
            sort_by: SortKey::Downloads,
        };
        let rebuilt = FilterState::from_query_pairs(
            state
                .to_query_pairs()
                .iter()
                .map(|(key, value)| (*key, value.as_str())),
        );
        assert_eq!(rebuilt, state);
    }

    #[test]
    fn unknown_query_values_fall_back_to_defaults() {
        let state =
            FilterState::from_query_pairs(vec![("type", "widget"), ("sort", "zzz"), ("x", "y")]);
        assert_eq!(state, FilterState::default());
    }

    #[test]
    fn sorting_defaults_are_omitted_from_pairs() {
        let pairs = FilterState::default().to_query_pairs();
        assert!(pairs.is_empty());
    }
}
