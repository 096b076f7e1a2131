use indexmap::IndexMap;
use serde::Serialize;

use crate::analyzers::observations::Observation;

/// A value with how often it was seen and, for text-derived values, where.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttributeSummary {
    pub value: String,
    pub count: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sources: Option<Vec<String>>,
}

/// Counts `values` most common first; ties keep first-seen order.
pub fn count_values<'a, I>(values: I) -> Vec<(String, u64)>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen: IndexMap<&str, u64> = IndexMap::new();
    for value in values {
        *seen.entry(value).or_default() += 1;
    }
    let mut counts: Vec<(String, u64)> = seen
        .into_iter()
        .map(|(value, count)| (value.to_string(), count))
        .collect();
    // Stable sort keeps first-seen order among equal counts.
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

/// Groups observations by value, attaching every source of each value.
pub fn summarize(observations: &[Observation]) -> Vec<AttributeSummary> {
    count_values(observations.iter().map(|o| o.value.as_str()))
        .into_iter()
        .map(|(value, count)| {
            let sources = observations
                .iter()
                .filter(|o| o.value == value)
                .map(|o| o.source.clone())
                .collect();
            AttributeSummary {
                value,
                count,
                sources: Some(sources),
            }
        })
        .collect()
}

/// Like [`summarize`] but for values with no provenance.
pub fn summarize_unsourced(values: &[String]) -> Vec<AttributeSummary> {
    count_values(values.iter().map(String::as_str))
        .into_iter()
        .map(|(value, count)| AttributeSummary {
            value,
            count,
            sources: None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obs(value: &str, source: &str) -> Observation {
        Observation {
            value: value.to_string(),
            source: source.to_string(),
        }
    }

    #[test]
    fn test_summarize_sorts_by_count() {
        let observations = vec![
            obs("cat", "a"),
            obs("dog", "b"),
            obs("dog", "c"),
            obs("fish", "d"),
        ];

        let summary = summarize(&observations);

        assert_eq!(summary.len(), 3);
        assert_eq!(summary[0].value, "dog");
        assert_eq!(summary[0].count, 2);
        assert_eq!(
            summary[0].sources,
            Some(vec!["b".to_string(), "c".to_string()])
        );
        assert_eq!(summary[1].value, "cat");
        assert_eq!(summary[2].value, "fish");
    }

    #[test]
    fn test_ties_keep_first_seen_order() {
        let counts = count_values(["b", "a", "a", "b", "c"]);

        assert_eq!(
            counts,
            vec![
                ("b".to_string(), 2),
                ("a".to_string(), 2),
                ("c".to_string(), 1)
            ]
        );
    }

    #[test]
    fn test_summarize_unsourced() {
        let summary = summarize_unsourced(&["female".to_string(), "female".to_string()]);

        assert_eq!(
            summary,
            vec![AttributeSummary {
                value: "female".to_string(),
                count: 2,
                sources: None
            }]
        );
    }

    #[test]
    fn test_empty_input() {
        assert!(summarize(&[]).is_empty());
    }
}
