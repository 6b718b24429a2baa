use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The closed set of resource kinds the hub catalogs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceType {
    Command,
    Rule,
    Mcp,
    Hook,
}

impl ResourceType {
    pub const ALL: [ResourceType; 4] = [Self::Command, Self::Rule, Self::Mcp, Self::Hook];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Command => "command",
            Self::Rule => "rule",
            Self::Mcp => "mcp",
            Self::Hook => "hook",
        }
    }

    /// Parse a type label, tolerating surrounding whitespace and case.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "command" => Some(Self::Command),
            "rule" => Some(Self::Rule),
            "mcp" => Some(Self::Mcp),
            "hook" => Some(Self::Hook),
            _ => None,
        }
    }
}

/// A single catalog entry. Field names mirror the catalog JSON document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceRecord {
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub excerpt: String,
    #[serde(rename = "type")]
    pub resource_type: ResourceType,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Precomputed concatenation of the textual fields, produced by the
    /// catalog pipeline for matching.
    #[serde(default)]
    pub search_content: String,
    #[serde(default)]
    pub file_size: u64,
    #[serde(default)]
    pub extension: String,
    #[serde(default)]
    pub file_name: String,
    #[serde(default)]
    pub file_path: String,
    pub created_at: DateTime<Utc>,
    /// Populated externally after load; absent means zero.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub download_count: Option<u64>,
}

impl ResourceRecord {
    #[must_use]
    pub fn downloads(&self) -> u64 {
        self.download_count.unwrap_or(0)
    }

    /// Tags joined for matching; insertion order is irrelevant to the matcher.
    pub(crate) fn tag_text(&self) -> String {
        self.tags.join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn type_labels_round_trip() {
        for kind in ResourceType::ALL {
            assert_eq!(ResourceType::parse(kind.as_str()), Some(kind));
        }
        assert_eq!(ResourceType::parse("  Rule "), Some(ResourceType::Rule));
        assert_eq!(ResourceType::parse("widget"), None);
    }

    #[test]
    fn record_deserializes_catalog_field_names() {
        let json = r#"{
            "slug": "pre-commit",
            "title": "Pre-commit Hook",
            "type": "command",
            "category": "git",
            "tags": ["git", "ci"],
            "searchContent": "pre-commit hook git ci",
            "fileSize": 412,
            "extension": "md",
            "fileName": "pre-commit.md",
            "filePath": "commands/git/pre-commit.md",
            "createdAt": "2024-05-01T12:00:00Z"
        }"#;
        let record: ResourceRecord = serde_json::from_str(json).expect("record should parse");
        assert_eq!(record.slug, "pre-commit");
        assert_eq!(record.resource_type, ResourceType::Command);
        assert_eq!(record.tag_text(), "git ci");
        assert_eq!(record.downloads(), 0);
        assert_eq!(
            record.created_at,
            Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
        );
    }
}
