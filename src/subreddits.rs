//! Read-only subreddit metadata table.
//!
//! The table maps a subreddit name to its topic classification and, for some
//! subreddits, an attribute the account can be inferred to have. It is loaded
//! once from CSV; a default table is embedded in the binary.

use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

use crate::error::{ProfileError, Result};

const DEFAULT_TABLE: &str = include_str!("../data/subreddits.csv");

/// Topic placeholder for a missing level.
pub const GENERIC_TOPIC: &str = "Generic";

/// Topic of subreddits absent from the table.
pub const OTHER_TOPIC: &str = "Other";

#[derive(Debug, Deserialize)]
struct TableRow {
    name: String,
    topic_level1: Option<String>,
    topic_level2: Option<String>,
    topic_level3: Option<String>,
    #[serde(default)]
    default: bool,
    #[serde(default)]
    ignore_text: bool,
    attribute: Option<String>,
    value: Option<String>,
}

/// Metadata for one subreddit.
#[derive(Debug, Clone, PartialEq)]
pub struct SubredditInfo {
    pub topic_level1: String,
    pub topic_level2: Option<String>,
    pub topic_level3: Option<String>,
    /// Ubiquitous subreddit held to a higher inference threshold.
    pub is_default: bool,
    /// Text posted here is not representative of the author (jokes, fiction).
    pub ignore_text: bool,
    /// Attribute category and value implied by regular activity here.
    pub attribute: Option<(String, String)>,
}

impl SubredditInfo {
    /// Full `level1>level2>level3` path with missing levels as "Generic".
    pub fn topic_path(&self) -> String {
        format!(
            "{}>{}>{}",
            self.topic_level1,
            self.topic_level2.as_deref().unwrap_or(GENERIC_TOPIC),
            self.topic_level3.as_deref().unwrap_or(GENERIC_TOPIC),
        )
    }
}

#[derive(Debug, Default)]
pub struct SubredditTable {
    entries: HashMap<String, SubredditInfo>,
}

impl SubredditTable {
    /// Loads the table embedded at build time.
    pub fn embedded() -> Result<Self> {
        Self::from_reader(DEFAULT_TABLE.as_bytes())
    }

    /// Loads a table from a CSV file at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = std::fs::File::open(path.as_ref()).map_err(csv::Error::from)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: std::io::Read>(reader: R) -> Result<Self> {
        let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
        let headers = rdr.headers()?.clone();
        let mut entries = HashMap::new();

        for result in rdr.records() {
            let record = result?;
            let line = record.position().map(|p| p.line()).unwrap_or_default();
            let row: TableRow = record.deserialize(Some(&headers))?;

            let topic_level1 = row.topic_level1.ok_or_else(|| ProfileError::TableRow {
                line,
                reason: format!("subreddit '{}' has no topic_level1", row.name),
            })?;

            let attribute = match (row.attribute, row.value) {
                (Some(attribute), Some(value)) => Some((attribute, value)),
                (None, None) => None,
                _ => {
                    return Err(ProfileError::TableRow {
                        line,
                        reason: format!(
                            "subreddit '{}' must set both attribute and value",
                            row.name
                        ),
                    });
                }
            };

            entries.insert(
                row.name,
                SubredditInfo {
                    topic_level1,
                    topic_level2: row.topic_level2,
                    topic_level3: row.topic_level3,
                    is_default: row.default,
                    ignore_text: row.ignore_text,
                    attribute,
                },
            );
        }

        debug!(entries = entries.len(), "Subreddit table loaded");
        Ok(Self { entries })
    }

    pub fn get(&self, name: &str) -> Option<&SubredditInfo> {
        self.entries.get(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_default(&self, name: &str) -> bool {
        self.get(name).is_some_and(|s| s.is_default)
    }

    pub fn ignores_text(&self, name: &str) -> bool {
        self.get(name).is_some_and(|s| s.ignore_text)
    }

    /// Level-1 topic used by the subreddit breakdown.
    pub fn level1_topic(&self, name: &str) -> &str {
        match self.get(name) {
            Some(info) if info.topic_level1 != OTHER_TOPIC => &info.topic_level1,
            _ => OTHER_TOPIC,
        }
    }

    /// Topic path used by the topic breakdown; unknown subreddits are "Other".
    pub fn topic_path(&self, name: &str) -> String {
        match self.get(name) {
            Some(info) if info.topic_level1 != OTHER_TOPIC => info.topic_path(),
            _ => OTHER_TOPIC.to_string(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SubredditInfo)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
name,topic_level1,topic_level2,topic_level3,default,ignore_text,attribute,value
gaming,Gaming,,,true,false,,
TwoXChromosomes,Lifestyle,Women,,false,false,gender,Female
Jokes,Entertainment,Humor,,false,true,,
misc,Other,,,false,false,,
";

    #[test]
    fn test_load_sample_table() {
        let table = SubredditTable::from_reader(SAMPLE.as_bytes()).unwrap();

        assert_eq!(table.len(), 4);
        assert!(table.is_default("gaming"));
        assert!(table.ignores_text("Jokes"));
        assert!(!table.ignores_text("unknown"));
        assert_eq!(
            table.get("TwoXChromosomes").unwrap().attribute,
            Some(("gender".to_string(), "Female".to_string()))
        );
    }

    #[test]
    fn test_topic_paths_fill_generic() {
        let table = SubredditTable::from_reader(SAMPLE.as_bytes()).unwrap();

        assert_eq!(table.topic_path("gaming"), "Gaming>Generic>Generic");
        assert_eq!(table.topic_path("TwoXChromosomes"), "Lifestyle>Women>Generic");
    }

    #[test]
    fn test_other_and_unknown_classify_as_other() {
        let table = SubredditTable::from_reader(SAMPLE.as_bytes()).unwrap();

        assert_eq!(table.topic_path("misc"), "Other");
        assert_eq!(table.topic_path("nope"), "Other");
        assert_eq!(table.level1_topic("misc"), "Other");
        assert_eq!(table.level1_topic("nope"), "Other");
        assert_eq!(table.level1_topic("gaming"), "Gaming");
    }

    #[test]
    fn test_attribute_without_value_is_rejected() {
        let csv = "name,topic_level1,topic_level2,topic_level3,default,ignore_text,attribute,value\n\
                   broken,Lifestyle,,,false,false,gender,\n";

        let result = SubredditTable::from_reader(csv.as_bytes());

        assert!(matches!(result, Err(ProfileError::TableRow { line: 2, .. })));
    }

    #[test]
    fn test_embedded_table_loads() {
        let table = SubredditTable::embedded().unwrap();

        assert!(!table.is_empty());
        assert!(table.get("AskReddit").is_some());
    }
}
