//! Data types of the profile report.

use serde::Serialize;

use crate::analyzers::buckets::Counters;
use crate::analyzers::lurk::LurkPeriod;
use crate::analyzers::synopsis::Synopsis;
use crate::analyzers::tree::{Activity, Branch, Size};
use crate::text::InsultSummary;

/// Report layout version consumers key on.
pub const REPORT_VERSION: u8 = 8;

impl From<Counters> for Activity {
    fn from(c: Counters) -> Self {
        Self {
            comments: c.comments,
            submissions: c.submissions,
            posts: c.posts(),
            comment_karma: c.comment_karma,
            submission_karma: c.submission_karma,
            karma: c.karma(),
        }
    }
}

/// Complete profile of one account, written out as JSON.
#[derive(Debug, Serialize)]
pub struct Report {
    pub username: String,
    pub version: u8,
    pub metadata: Metadata,
    pub summary: Summary,
    pub anti_sociality: InsultSummary,
    pub synopsis: Synopsis,
    pub metrics: Metrics,
}

#[derive(Debug, Serialize)]
pub struct Metadata {
    pub reddit_id: String,
    pub is_mod: bool,
    pub latest_comment_id: Option<String>,
    pub earliest_comment_id: Option<String>,
    pub latest_submission_id: Option<String>,
    pub earliest_submission_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct Summary {
    pub signup_date: i64,
    pub first_post_date: i64,
    pub lurk_period: LurkPeriod,
    pub comments: CommentSummary,
    pub submissions: SubmissionSummary,
}

#[derive(Debug, Default, PartialEq, Serialize)]
pub struct CommentRef {
    pub text: Option<String>,
    pub permalink: Option<String>,
}

#[derive(Debug, Default, PartialEq, Serialize)]
pub struct SubmissionRef {
    pub title: Option<String>,
    pub permalink: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CommentSummary {
    pub count: usize,
    pub gilded: u64,
    pub best: CommentRef,
    pub worst: CommentRef,
    /// Karma reported by reddit.
    pub all_time_karma: i64,
    /// Karma summed over the posts in the dump.
    pub computed_karma: i64,
    pub average_karma: f64,
    pub total_word_count: u64,
    pub unique_word_count: u64,
    pub hours_typed: f64,
    pub karma_per_word: f64,
}

#[derive(Debug, Serialize)]
pub struct SubmissionSummary {
    pub count: usize,
    pub gilded: u64,
    pub best: SubmissionRef,
    pub worst: SubmissionRef,
    pub all_time_karma: i64,
    pub computed_karma: i64,
    pub average_karma: f64,
    pub type_domain_breakdown: Branch<Size>,
}

#[derive(Debug, Serialize)]
pub struct DateMetric {
    /// `YYYY-MM-01`
    pub date: String,
    #[serde(flatten)]
    pub activity: Activity,
}

#[derive(Debug, Serialize)]
pub struct HourMetric {
    pub hour: u32,
    #[serde(flatten)]
    pub activity: Activity,
}

#[derive(Debug, Serialize)]
pub struct WeekdayMetric {
    pub weekday: &'static str,
    #[serde(flatten)]
    pub activity: Activity,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WordCount {
    pub text: String,
    pub size: u64,
}

#[derive(Debug, Serialize)]
pub struct Metrics {
    pub date: Vec<DateMetric>,
    pub hour: Vec<HourMetric>,
    pub weekday: Vec<WeekdayMetric>,
    pub subreddit: Branch<Activity>,
    pub topic: Branch<Size>,
    pub common_words: Vec<WordCount>,
    /// One hex digit per heatmap cell.
    pub recent_activity_heatmap: String,
    pub recent_karma: Vec<i64>,
    pub recent_posts: Vec<u64>,
}
