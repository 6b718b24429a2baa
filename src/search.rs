//! Weighted fuzzy matching over catalog records.
//!
//! Matching is delegated to frizbee's Smith-Waterman scorer. Each textual
//! field is matched separately, normalized against the query's self-match
//! score, and combined into a single weighted distance per record.

use std::cmp::Ordering;

use frizbee::{Config, match_list};
use tracing::debug;

use crate::types::ResourceRecord;

/// Queries shorter than this never invoke fuzzy matching; the candidate set
/// passes through unchanged in its original order.
pub const MIN_QUERY_LEN: usize = 2;

/// Worst weighted distance a record may score and still count as a match
/// (0 = exact, 1 = matches anything).
const DISTANCE_THRESHOLD: f32 = 0.4;

const WEIGHT_TITLE: f32 = 0.4;
const WEIGHT_DESCRIPTION: f32 = 0.3;
const WEIGHT_SEARCH_CONTENT: f32 = 0.2;
const WEIGHT_TAGS: f32 = 0.1;

struct Field {
    weight: f32,
    haystacks: Vec<String>,
}

/// Approximate-match index over one fixed slice of records.
///
/// Construction is cheap relative to catalog size; rebuild whenever the
/// candidate set changes identity rather than attempting incremental update.
pub struct FuzzyIndex {
    fields: [Field; 4],
    len: usize,
}

impl FuzzyIndex {
    #[must_use]
    pub fn build(records: &[ResourceRecord]) -> Self {
        let fields = [
            Field {
                weight: WEIGHT_TITLE,
                haystacks: records.iter().map(|r| r.title.clone()).collect(),
            },
            Field {
                weight: WEIGHT_DESCRIPTION,
                haystacks: records.iter().map(|r| r.description.clone()).collect(),
            },
            Field {
                weight: WEIGHT_SEARCH_CONTENT,
                haystacks: records.iter().map(|r| r.search_content.clone()).collect(),
            },
            Field {
                weight: WEIGHT_TAGS,
                haystacks: records.iter().map(ResourceRecord::tag_text).collect(),
            },
        ];
        debug!(records = records.len(), "built fuzzy index");
        Self {
            fields,
            len: records.len(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Ranked indices into the slice the index was built from, best match
    /// first. Queries below [`MIN_QUERY_LEN`] return every index in input
    /// order.
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<usize> {
        let needle = query.trim();
        if needle.chars().count() < MIN_QUERY_LEN {
            return (0..self.len).collect();
        }

        let config = config_for_query(needle);
        let reference = self_match_score(needle, &config);
        if reference <= 0.0 {
            return (0..self.len).collect();
        }

        // Weighted average over the fields that matched, with weights
        // renormalized so a perfect single-field match scores distance 0.
        let mut matched_weight = vec![0.0f32; self.len];
        let mut weighted_score = vec![0.0f32; self.len];
        for field in &self.fields {
            let haystacks: Vec<&str> = field.haystacks.iter().map(String::as_str).collect();
            for entry in match_list(needle, &haystacks, &config) {
                if entry.score == 0 {
                    continue;
                }
                let normalized = (f32::from(entry.score) / reference).min(1.0);
                let index = entry.index as usize;
                matched_weight[index] += field.weight;
                weighted_score[index] += field.weight * normalized;
            }
        }

        let mut ranked: Vec<(usize, f32)> = Vec::new();
        for index in 0..self.len {
            if matched_weight[index] <= 0.0 {
                continue;
            }
            let distance = 1.0 - weighted_score[index] / matched_weight[index];
            if distance > DISTANCE_THRESHOLD {
                continue;
            }
            ranked.push((index, distance));
        }
        ranked.sort_by(|a, b| {
            a.1.partial_cmp(&b.1)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.0.cmp(&b.0))
        });
        ranked.into_iter().map(|(index, _)| index).collect()
    }
}

/// Scale the typo allowance with the query length so short queries stay
/// strict while long ones tolerate more distortion.
fn config_for_query(query: &str) -> Config {
    let mut config = Config::default();

    let length = query.chars().count();
    let mut allowed_typos: u16 = match length {
        0 | 1 => 0,
        2..=4 => 1,
        5..=7 => 2,
        8..=12 => 3,
        _ => 4,
    };
    if let Ok(max_reasonable) = u16::try_from(length.saturating_sub(1)) {
        allowed_typos = allowed_typos.min(max_reasonable);
    }
    config.max_typos = Some(allowed_typos);
    config.sort = false;

    config
}

/// Score of the query matched against itself, used as the normalization
/// reference for field scores.
fn self_match_score(needle: &str, config: &Config) -> f32 {
    match_list(needle, &[needle], config)
        .first()
        .map_or(0.0, |entry| f32::from(entry.score))
}
