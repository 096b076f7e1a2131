//! Formatting of accumulated state into report sections.

use crate::analyzers::buckets::{DateBucket, HourBucket, WeekdayBucket};
use crate::analyzers::summarize::count_values;
use crate::analyzers::types::{DateMetric, HourMetric, WeekdayMetric, WordCount};
use crate::analyzers::utility::{round2, scale};

static WEEKDAY_NAMES: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// Renders heatmap cells as one hex digit each.
///
/// Non-zero cells are scaled from the observed range onto `1..=15`. When
/// every cell holds the same count the map is all zeros.
pub fn heatmap_string(cells: &[u64]) -> String {
    let (Some(&min), Some(&max)) = (cells.iter().min(), cells.iter().max()) else {
        return String::new();
    };
    let hmin = if min == 0 { 1.0 } else { min as f64 };
    let hmax = max as f64;

    if hmin >= hmax {
        return "0".repeat(cells.len());
    }

    cells
        .iter()
        .map(|&h| {
            if h == 0 {
                '0'
            } else {
                let digit = scale(h as f64, (hmin, hmax), (1.0, 15.0)) as u32;
                char::from_digit(digit, 16).unwrap_or('f')
            }
        })
        .collect()
}

pub fn date_metrics(dates: &[DateBucket]) -> Vec<DateMetric> {
    dates
        .iter()
        .map(|d| DateMetric {
            date: format!("{}-{:02}-01", d.year, d.month),
            activity: d.counters.into(),
        })
        .collect()
}

pub fn hour_metrics(hours: &[HourBucket]) -> Vec<HourMetric> {
    hours
        .iter()
        .map(|h| HourMetric {
            hour: h.hour,
            activity: h.counters.into(),
        })
        .collect()
}

pub fn weekday_metrics(weekdays: &[WeekdayBucket]) -> Vec<WeekdayMetric> {
    weekdays
        .iter()
        .map(|w| WeekdayMetric {
            weekday: WEEKDAY_NAMES[w.weekday as usize % 7],
            activity: w.counters.into(),
        })
        .collect()
}

/// The `limit` most frequent words, most common first.
pub fn common_words(words: &[String], limit: usize) -> Vec<WordCount> {
    let mut counts = count_values(words.iter().map(String::as_str));
    counts.truncate(limit);
    counts
        .into_iter()
        .map(|(text, size)| WordCount { text, size })
        .collect()
}

/// Hours spent typing `words` at `words_per_minute`.
pub fn hours_typed(words: u64, words_per_minute: u64) -> f64 {
    round2(words as f64 / (words_per_minute.max(1) as f64 * 60.0))
}
