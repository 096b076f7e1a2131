use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};

use crate::analyzers::lurk::GapMeasure;
use crate::analyzers::synopsis::Thresholds;

/// Tunables of one profiling run.
#[derive(Debug, Clone)]
pub struct ProfileConfig {
    pub thresholds: Thresholds,
    /// Typing speed used to estimate `hours_typed`.
    pub words_per_minute: u64,
    /// Length of the trailing heatmap window in days.
    pub window_days: i64,
    /// Number of most common words kept in the report.
    pub common_words: usize,
    pub gap_measure: GapMeasure,
    /// Instant the profile is computed at; closes every lurk timeline.
    pub now: DateTime<Utc>,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            thresholds: Thresholds::default(),
            words_per_minute: 40,
            window_days: 60,
            common_words: 200,
            gap_measure: GapMeasure::default(),
            now: Utc::now(),
        }
    }
}

impl ProfileConfig {
    /// Pins "now" to the last second of `today`.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.now = today.and_time(NaiveTime::default()).and_utc() + Duration::seconds(86_399);
        self
    }

    pub fn today(&self) -> NaiveDate {
        self.now.date_naive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn test_defaults() {
        let config = ProfileConfig::default();

        assert_eq!(config.thresholds.min, 3);
        assert_eq!(config.thresholds.min_default, 10);
        assert_eq!(config.words_per_minute, 40);
        assert_eq!(config.window_days, 60);
        assert_eq!(config.common_words, 200);
        assert_eq!(config.gap_measure, GapMeasure::Elapsed);
    }

    #[test]
    fn test_with_today_pins_end_of_day() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        let config = ProfileConfig::default().with_today(today);

        assert_eq!(config.today(), today);
        assert_eq!(config.now.hour(), 23);
        assert_eq!(config.now.second(), 59);
    }
}
