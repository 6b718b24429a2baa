//! Facet counts over a candidate result set.

use std::collections::BTreeMap;

use crate::types::{ResourceRecord, ResourceType, TypeFilter};

/// Result counts along the type and category facet dimensions.
///
/// Callers pass either the full catalog (no filters active) or the current
/// filtered set, so counts reflect the rest of the active filter context.
/// Zero counts are valid and mark dead-end filter combinations; callers
/// disable or strike through such options rather than hiding them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FacetCounts {
    /// Synthetic `all` bucket: always equals the input length.
    pub all: usize,
    pub by_type: BTreeMap<ResourceType, usize>,
    pub by_category: BTreeMap<String, usize>,
    pub by_category_and_type: BTreeMap<(String, ResourceType), usize>,
}

impl FacetCounts {
    /// Count the candidate set along every facet dimension. Every known
    /// type is present in `by_type`, at zero when absent from the input.
    pub fn tally<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a ResourceRecord>,
    {
        let mut counts = Self::default();
        for kind in ResourceType::ALL {
            counts.by_type.insert(kind, 0);
        }

        for record in records {
            counts.all += 1;
            *counts.by_type.entry(record.resource_type).or_default() += 1;
            if !record.category.is_empty() {
                *counts
                    .by_category
                    .entry(record.category.clone())
                    .or_default() += 1;
                *counts
                    .by_category_and_type
                    .entry((record.category.clone(), record.resource_type))
                    .or_default() += 1;
            }
        }
        counts
    }

    /// Count for a prospective type choice; `all` reports the whole set.
    #[must_use]
    pub fn for_type(&self, filter: TypeFilter) -> usize {
        match filter.as_type() {
            None => self.all,
            Some(kind) => self.by_type.get(&kind).copied().unwrap_or(0),
        }
    }

    #[must_use]
    pub fn for_category(&self, category: &str) -> usize {
        self.by_category.get(category).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn for_pair(&self, category: &str, kind: ResourceType) -> usize {
        self.by_category_and_type
            .get(&(category.to_string(), kind))
            .copied()
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn record(slug: &str, kind: ResourceType, category: &str) -> ResourceRecord {
        ResourceRecord {
            slug: slug.to_string(),
            title: slug.to_string(),
            description: String::new(),
            excerpt: String::new(),
            resource_type: kind,
            category: category.to_string(),
            tags: Vec::new(),
            search_content: String::new(),
            file_size: 0,
            extension: String::new(),
            file_name: String::new(),
            file_path: String::new(),
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            download_count: None,
        }
    }

    #[test]
    fn all_bucket_equals_input_length() {
        let records = vec![
            record("a", ResourceType::Command, "git"),
            record("c", ResourceType::Command, "testing"),
        ];
        let counts = FacetCounts::tally(&records);
        assert_eq!(counts.all, 2);
        assert_eq!(counts.for_type(TypeFilter::All), 2);
        assert_eq!(counts.for_type(TypeFilter::Command), 2);
        assert_eq!(counts.for_type(TypeFilter::Rule), 0);
        assert_eq!(counts.for_type(TypeFilter::Mcp), 0);
        assert_eq!(counts.for_type(TypeFilter::Hook), 0);
    }

    #[test]
    fn categories_aggregate_across_types() {
        let records = vec![
            record("a", ResourceType::Command, "git"),
            record("b", ResourceType::Rule, "git"),
            record("c", ResourceType::Command, "testing"),
        ];
        let counts = FacetCounts::tally(&records);
        assert_eq!(counts.for_category("git"), 2);
        assert_eq!(counts.for_category("testing"), 1);
        assert_eq!(counts.for_pair("git", ResourceType::Rule), 1);
        assert_eq!(counts.for_pair("git", ResourceType::Hook), 0);
    }

    #[test]
    fn empty_input_counts_to_zero_everywhere() {
        let counts = FacetCounts::tally(std::iter::empty::<&ResourceRecord>());
        assert_eq!(counts.all, 0);
        assert_eq!(counts.by_type.len(), ResourceType::ALL.len());
        assert!(counts.by_category.is_empty());
    }

    #[test]
    fn uncategorized_records_count_by_type_only() {
        let records = vec![record("a", ResourceType::Mcp, "")];
        let counts = FacetCounts::tally(&records);
        assert_eq!(counts.for_type(TypeFilter::Mcp), 1);
        assert!(counts.by_category.is_empty());
    }
}
