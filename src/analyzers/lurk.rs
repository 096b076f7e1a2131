//! Longest-inactivity ("lurk period") detection.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{ProfileError, Result};

/// How the gap between two consecutive activity timestamps is measured.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum GapMeasure {
    /// Full elapsed seconds between the two points.
    #[default]
    Elapsed,
    /// Only the seconds left over after removing whole days.
    SubDayRemainder,
}

impl GapMeasure {
    fn measure(&self, from: DateTime<Utc>, to: DateTime<Utc>) -> i64 {
        let elapsed = (to - from).num_seconds();
        match self {
            GapMeasure::Elapsed => elapsed,
            GapMeasure::SubDayRemainder => elapsed.rem_euclid(86_400),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LurkPeriod {
    pub from: i64,
    pub to: i64,
}

#[derive(Debug, Clone, Copy)]
struct Gap {
    from: DateTime<Utc>,
    to: DateTime<Utc>,
    value: i64,
}

/// Largest gap of an ascending timeline; the first one wins ties.
fn widest_gap(timeline: &[DateTime<Utc>], measure: GapMeasure) -> Option<Gap> {
    timeline
        .windows(2)
        .map(|pair| Gap {
            from: pair[0],
            to: pair[1],
            value: measure.measure(pair[0], pair[1]),
        })
        .fold(None, |widest: Option<Gap>, gap| match widest {
            Some(w) if w.value >= gap.value => Some(w),
            _ => Some(gap),
        })
}

/// Finds the lurk period over the comment, submission and combined
/// timelines, each closed by `now`.
///
/// Each timeline contributes its widest gap; the narrowest of those is the
/// result (the comment timeline wins ties, then submissions).
///
/// # Errors
///
/// Returns [`ProfileError::NoLurkCandidate`] if no timeline has two points,
/// which only happens for an account with no activity.
pub fn detect(
    comment_times: &[DateTime<Utc>],
    submission_times: &[DateTime<Utc>],
    now: DateTime<Utc>,
    measure: GapMeasure,
) -> Result<LurkPeriod> {
    let close = |times: &[DateTime<Utc>]| {
        let mut timeline = times.to_vec();
        timeline.sort();
        timeline.push(now);
        timeline
    };

    let mut combined = comment_times.to_vec();
    combined.extend_from_slice(submission_times);

    let candidates = [
        widest_gap(&close(comment_times), measure),
        widest_gap(&close(submission_times), measure),
        widest_gap(&close(&combined), measure),
    ];

    candidates
        .into_iter()
        .flatten()
        .fold(None, |narrowest: Option<Gap>, gap| match narrowest {
            Some(n) if n.value <= gap.value => Some(n),
            _ => Some(gap),
        })
        .map(|gap| LurkPeriod {
            from: gap.from.timestamp(),
            to: gap.to.timestamp(),
        })
        .ok_or(ProfileError::NoLurkCandidate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn t(day: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + Duration::days(day)
    }

    #[test]
    fn test_no_activity_has_no_candidate() {
        let result = detect(&[], &[], t(10), GapMeasure::Elapsed);

        assert!(matches!(result, Err(ProfileError::NoLurkCandidate)));
    }

    #[test]
    fn test_single_comment_gap_to_now() {
        let period = detect(&[t(3)], &[], t(10), GapMeasure::Elapsed).unwrap();

        assert_eq!(period.from, t(3).timestamp());
        assert_eq!(period.to, t(10).timestamp());
    }

    #[test]
    fn test_selects_minimum_of_maxima() {
        // widest gaps: comments 18 days, submissions 10, combined 10
        let comments = vec![t(1), t(0)];
        let submissions = vec![t(9)];

        let period = detect(&comments, &submissions, t(19), GapMeasure::Elapsed).unwrap();

        assert_eq!(period.from, t(9).timestamp());
        assert_eq!(period.to, t(19).timestamp());
    }

    #[test]
    fn test_ties_prefer_earlier_timeline() {
        let comments = vec![t(0)];
        let submissions = vec![t(10)];

        // comments: 20 days, submissions: 10 days, combined: 10 days (ties -> submissions)
        let period = detect(&comments, &submissions, t(20), GapMeasure::Elapsed).unwrap();

        assert_eq!((period.from, period.to), (t(10).timestamp(), t(20).timestamp()));
    }

    #[test]
    fn test_sub_day_remainder_measure() {
        let start = t(0);
        let comments = vec![start, start + Duration::days(5) + Duration::hours(1)];
        let now = start + Duration::days(5) + Duration::hours(3);

        // remainders: 1h then 2h -> widest is the 2h gap
        let period = detect(&comments, &[], now, GapMeasure::SubDayRemainder).unwrap();

        assert_eq!(period.to, now.timestamp());
        assert!(period.from < period.to);
    }
}
