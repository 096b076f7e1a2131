//! Attribute synthesis.
//!
//! Runs once all posts have been processed, since every threshold depends on
//! the account's totals. Three sources feed the synopsis:
//!
//! 1. direct observations loaded from post text (`data`, `data_extra`);
//! 2. topics of the subreddits the account is active in (`data`);
//! 3. attributes implied by subreddit activity and by cross-field rules
//!    (`data_derived`).

use indexmap::IndexMap;
use serde::Serialize;
use tracing::debug;

use crate::analyzers::observations::{Category, Confidence, Observations};
use crate::analyzers::rules;
use crate::analyzers::summarize::{AttributeSummary, summarize, summarize_unsourced};
use crate::subreddits::SubredditTable;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SynopsisEntry {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<AttributeSummary>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_extra: Option<Vec<AttributeSummary>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_derived: Option<Vec<AttributeSummary>>,
}

/// Category name to entry, in the order categories were first filled.
pub type Synopsis = IndexMap<String, SynopsisEntry>;

/// Derived values per category, one element per supporting post.
pub type DerivedAttributes = IndexMap<String, Vec<String>>;

/// Minimum activity before a subreddit says anything about the account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Thresholds {
    pub min: u64,
    /// Applies instead of `min` to default subreddits.
    pub min_default: u64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            min: 3,
            min_default: 10,
        }
    }
}

pub struct Synthesizer<'t> {
    table: &'t SubredditTable,
    thresholds: Thresholds,
}

impl<'t> Synthesizer<'t> {
    pub fn new(table: &'t SubredditTable, thresholds: Thresholds) -> Self {
        Self { table, thresholds }
    }

    fn qualifies(&self, subreddit: &str, count: u64) -> bool {
        let threshold = if self.table.is_default(subreddit) {
            self.thresholds.min_default
        } else {
            self.thresholds.min
        };
        count >= threshold
    }

    /// Collects subreddit-implied and cross-field attributes.
    ///
    /// Comment and submission counts are judged separately; a qualifying
    /// subreddit contributes its value once per post.
    pub fn derive_attributes(
        &self,
        commented: &[(String, u64)],
        submitted: &[(String, u64)],
        observations: &Observations,
    ) -> DerivedAttributes {
        let mut derived = DerivedAttributes::new();

        for (name, count) in commented.iter().chain(submitted.iter()) {
            if !self.qualifies(name, *count) {
                continue;
            }
            let Some((category, value)) = self.table.get(name).and_then(|s| s.attribute.as_ref())
            else {
                continue;
            };
            let values = derived.entry(category.clone()).or_default();
            values.extend(std::iter::repeat_n(value.to_lowercase(), *count as usize));
        }

        if observations.contains(Category::RelationshipPartner, "wife") {
            derived.entry("gender".to_string()).or_default().push("male".to_string());
        }
        if observations.contains(Category::RelationshipPartner, "husband") {
            derived.entry("gender".to_string()).or_default().push("female".to_string());
        }

        derived
    }

    /// Topic path counts of qualifying subreddits, most common first.
    fn synopsis_topics(&self, posted: &[(String, u64)]) -> Vec<(String, u64)> {
        let mut topics: IndexMap<String, u64> = IndexMap::new();
        for (name, count) in posted {
            if !self.qualifies(name, *count) {
                continue;
            }
            if let Some(info) = self.table.get(name) {
                *topics.entry(info.topic_path()).or_default() += count;
            }
        }
        let mut topics: Vec<(String, u64)> = topics.into_iter().collect();
        topics.sort_by(|a, b| b.1.cmp(&a.1));
        topics
    }

    /// Builds the synopsis. `posted` holds per-subreddit post counts over
    /// both kinds.
    pub fn synopsis(
        &self,
        observations: &Observations,
        derived: &DerivedAttributes,
        posted: &[(String, u64)],
    ) -> Synopsis {
        let mut synopsis = Synopsis::new();

        for category in Category::ALL {
            let name = category.as_str();

            let mut data = summarize(observations.get(category, Confidence::Direct));
            if rules::is_single_valued(name) {
                data.truncate(1);
            }
            if !data.is_empty() {
                synopsis.entry(name.to_string()).or_default().data = Some(data);
            }

            let extra = summarize(observations.get(category, Confidence::Extra));
            if !extra.is_empty() {
                synopsis.entry(name.to_string()).or_default().data_extra = Some(extra);
            }
        }

        for (topic, count) in self.synopsis_topics(posted) {
            if count < self.thresholds.min {
                continue;
            }
            let Some((key, label)) = topic_key(&topic) else {
                continue;
            };
            let summary = AttributeSummary {
                value: label,
                count,
                sources: None,
            };
            match synopsis.get_mut(&key) {
                Some(entry) => {
                    if !rules::is_single_valued(&key) {
                        entry.data.get_or_insert_with(Vec::new).push(summary);
                    }
                }
                None => {
                    synopsis.insert(
                        key,
                        SynopsisEntry {
                            data: Some(vec![summary]),
                            ..Default::default()
                        },
                    );
                }
            }
        }

        for (category, values) in derived {
            let mut summary = summarize_unsourced(values);
            if rules::is_single_valued(category) {
                summary.truncate(1);
            }
            if !summary.is_empty() {
                synopsis.entry(category.clone()).or_default().data_derived = Some(summary);
            }
        }

        debug!(categories = synopsis.len(), "Synopsis built");
        synopsis
    }
}

/// Maps a `level1>level2>level3` topic path to the synopsis category it
/// belongs to and its label, or `None` if the topic is not admitted.
pub fn topic_key(topic: &str) -> Option<(String, String)> {
    let levels: Vec<String> = topic
        .split('>')
        .map(str::to_lowercase)
        .filter(|level| level != "generic")
        .collect();

    let level1 = levels.first()?;
    if rules::is_excluded_topic(level1) {
        return None;
    }

    let deep_enough = levels.len() >= rules::min_levels(level1);
    let level2 = levels.get(1).filter(|l| !rules::is_excluded_topic(l));

    let key = match level2 {
        Some(level2) if deep_enough && rules::is_level2_group(level2) => level2.clone(),
        Some(_) if deep_enough => level1.clone(),
        _ if !rules::is_level1_group(level1) => "other".to_string(),
        _ => return None,
    };

    // The most specific level names the topic.
    let label = levels.last()?.clone();
    if rules::is_excluded_label(&label) {
        return None;
    }

    Some((key, label))
}
