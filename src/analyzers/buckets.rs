//! Time-bucketed activity tables.
//!
//! [`TimeBuckets`] keeps per-month, per-hour and per-weekday comment and
//! submission tallies plus a trailing-window heatmap. [`Superlatives`] tracks
//! best/worst/earliest/latest posts of one kind.

use chrono::{DateTime, Datelike, Duration, NaiveDate, Timelike, Utc};
use serde::Serialize;

use crate::error::{ProfileError, Result};
use crate::posts::Post;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostKind {
    Comment,
    Submission,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Counters {
    pub comments: u64,
    pub submissions: u64,
    pub comment_karma: i64,
    pub submission_karma: i64,
}

impl Counters {
    fn record(&mut self, kind: PostKind, score: i64) {
        match kind {
            PostKind::Comment => {
                self.comments += 1;
                self.comment_karma += score;
            }
            PostKind::Submission => {
                self.submissions += 1;
                self.submission_karma += score;
            }
        }
    }

    pub fn posts(&self) -> u64 {
        self.comments + self.submissions
    }

    pub fn karma(&self) -> i64 {
        self.comment_karma + self.submission_karma
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DateBucket {
    pub year: i32,
    pub month: u32,
    pub counters: Counters,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HourBucket {
    pub hour: u32,
    pub counters: Counters,
}

/// Weekday 0 is Monday.
#[derive(Debug, Clone, PartialEq)]
pub struct WeekdayBucket {
    pub weekday: u32,
    pub counters: Counters,
}

#[derive(Debug, Clone)]
pub struct TimeBuckets {
    today: NaiveDate,
    window_days: i64,
    pub dates: Vec<DateBucket>,
    pub hours: Vec<HourBucket>,
    pub weekdays: Vec<WeekdayBucket>,
    /// `(window_days + 1) * 24` cells, indexed by `day * 24 + hour`.
    pub heatmap: Vec<u64>,
    pub recent_karma: Vec<i64>,
    pub recent_posts: Vec<u64>,
}

impl TimeBuckets {
    /// Pre-allocates one date bucket per month from `signup` to `today`
    /// inclusive, and every hour and weekday bucket.
    pub fn new(signup: NaiveDate, today: NaiveDate, window_days: i64) -> Self {
        let mut dates = Vec::new();
        let (mut year, mut month) = (signup.year(), signup.month());
        while (year, month) <= (today.year(), today.month()) {
            dates.push(DateBucket {
                year,
                month,
                counters: Counters::default(),
            });
            if month == 12 {
                year += 1;
                month = 1;
            } else {
                month += 1;
            }
        }

        let days = (window_days + 1) as usize;

        Self {
            today,
            window_days,
            dates,
            hours: (0..24)
                .map(|hour| HourBucket {
                    hour,
                    counters: Counters::default(),
                })
                .collect(),
            weekdays: (0..7)
                .map(|weekday| WeekdayBucket {
                    weekday,
                    counters: Counters::default(),
                })
                .collect(),
            heatmap: vec![0; days * 24],
            recent_karma: vec![0; days],
            recent_posts: vec![0; days],
        }
    }

    /// Adds one post to every table it belongs to.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileError::MissingDateBucket`] if the post's month lies
    /// outside the pre-allocated signup-to-today span.
    pub fn record(&mut self, timestamp: DateTime<Utc>, kind: PostKind, score: i64) -> Result<()> {
        let date = timestamp.date_naive();
        let (year, month) = (date.year(), date.month());

        let bucket = self
            .dates
            .iter_mut()
            .find(|d| d.year == year && d.month == month)
            .ok_or(ProfileError::MissingDateBucket { year, month })?;
        bucket.counters.record(kind, score);

        let hour = timestamp.hour();
        if let Some(h) = self.hours.iter_mut().find(|h| h.hour == hour) {
            h.counters.record(kind, score);
        }

        let weekday = date.weekday().num_days_from_monday();
        if let Some(w) = self.weekdays.iter_mut().find(|w| w.weekday == weekday) {
            w.counters.record(kind, score);
        }

        let window_start = self.today - Duration::days(self.window_days);
        let day = (date - window_start).num_days();
        if day > 0 && day <= self.window_days {
            // Submissions land one day earlier than comments on the heatmap.
            let heatmap_day = match kind {
                PostKind::Comment => day,
                PostKind::Submission => day - 1,
            };
            self.heatmap[(heatmap_day * 24) as usize + hour as usize] += 1;
            self.recent_karma[day as usize] += score;
            self.recent_posts[day as usize] += 1;
        }

        Ok(())
    }

    pub fn total_comment_karma(&self) -> i64 {
        self.dates.iter().map(|d| d.counters.comment_karma).sum()
    }

    pub fn total_submission_karma(&self) -> i64 {
        self.dates.iter().map(|d| d.counters.submission_karma).sum()
    }
}

/// Running best/worst/earliest/latest of one post kind, in input order.
#[derive(Debug)]
pub struct Superlatives<'a, P> {
    pub best: Option<&'a P>,
    pub worst: Option<&'a P>,
    pub earliest: Option<&'a P>,
    pub latest: Option<&'a P>,
}

impl<P> Default for Superlatives<'_, P> {
    fn default() -> Self {
        Self {
            best: None,
            worst: None,
            earliest: None,
            latest: None,
        }
    }
}

impl<'a, P: Post> Superlatives<'a, P> {
    /// Input is newest first: the first post seen is the latest and the
    /// last one seen is the earliest.
    pub fn track(&mut self, post: &'a P) {
        let (Some(best), Some(worst)) = (self.best, self.worst) else {
            self.best = Some(post);
            self.worst = Some(post);
            self.latest = Some(post);
            self.earliest = Some(post);
            return;
        };

        if post.score() > best.score() {
            self.best = Some(post);
        } else if post.score() < worst.score() {
            self.worst = Some(post);
        }
        self.earliest = Some(post);
    }
}
