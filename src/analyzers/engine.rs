//! Single-pass profile aggregation over one account dump.
//!
//! Comments and then submissions stream through the time buckets and the
//! classifier in dump order. First-person text is handed to the text
//! collaborators along the way. Synthesis, lurk detection and report assembly
//! run once every post has been seen.

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::analyzers::buckets::{PostKind, Superlatives, TimeBuckets};
use crate::analyzers::classify::Classifier;
use crate::analyzers::lurk;
use crate::analyzers::observations::Observations;
use crate::analyzers::report::{
    common_words, date_metrics, heatmap_string, hour_metrics, hours_typed, weekday_metrics,
};
use crate::analyzers::synopsis::Synthesizer;
use crate::analyzers::types::{
    CommentRef, CommentSummary, Metadata, Metrics, REPORT_VERSION, Report, SubmissionRef,
    SubmissionSummary, Summary,
};
use crate::analyzers::utility::{ratio, round2};
use crate::config::ProfileConfig;
use crate::error::{ProfileError, Result};
use crate::posts::{AccountDump, Comment, Submission, to_datetime};
use crate::subreddits::SubredditTable;
use crate::text::{
    AttributeLoader, HeuristicAttributeLoader, InsultScorer, LexiconExtractor,
    LexiconInsultScorer, TextExtractor, mentions_self, sanitize,
};

/// Holds every piece of derived state for one profiling run.
pub struct ProfileEngine<'a> {
    dump: &'a AccountDump,
    table: &'a SubredditTable,
    config: &'a ProfileConfig,
    extractor: &'a dyn TextExtractor,
    loader: &'a dyn AttributeLoader,
    scorer: &'a mut dyn InsultScorer,

    buckets: TimeBuckets,
    classifier: Classifier<'a>,
    observations: Observations,
    comments: Superlatives<'a, Comment>,
    submissions: Superlatives<'a, Submission>,
    corpus: Vec<String>,
    sentiments: Vec<f64>,
    comment_times: Vec<DateTime<Utc>>,
    submission_times: Vec<DateTime<Utc>>,
    comments_gilded: u64,
    submissions_gilded: u64,
}

impl<'a> ProfileEngine<'a> {
    /// Prepares an engine whose date buckets span the account's signup month
    /// up to the configured "today".
    ///
    /// # Errors
    ///
    /// Returns [`ProfileError::InvalidTimestamp`] if the signup time is not
    /// representable.
    pub fn new(
        dump: &'a AccountDump,
        table: &'a SubredditTable,
        config: &'a ProfileConfig,
        extractor: &'a dyn TextExtractor,
        loader: &'a dyn AttributeLoader,
        scorer: &'a mut dyn InsultScorer,
    ) -> Result<Self> {
        let signup = to_datetime(dump.about.created_utc)?;
        let buckets = TimeBuckets::new(signup.date_naive(), config.today(), config.window_days);

        Ok(Self {
            dump,
            table,
            config,
            extractor,
            loader,
            scorer,
            buckets,
            classifier: Classifier::new(table),
            observations: Observations::new(),
            comments: Superlatives::default(),
            submissions: Superlatives::default(),
            corpus: Vec::new(),
            sentiments: Vec::new(),
            comment_times: Vec::with_capacity(dump.comments.len()),
            submission_times: Vec::with_capacity(dump.submissions.len()),
            comments_gilded: 0,
            submissions_gilded: 0,
        })
    }

    /// Processes every post and assembles the report.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileError::NoData`] for an account with no posts, and
    /// propagates bucket, timestamp and lurk detection failures.
    #[tracing::instrument(skip_all, fields(username = %self.dump.about.name))]
    pub fn run(mut self) -> Result<Report> {
        if self.dump.is_empty() {
            return Err(ProfileError::NoData);
        }

        let dump = self.dump;
        for comment in &dump.comments {
            self.process_comment(comment)?;
        }
        for submission in &dump.submissions {
            self.process_submission(submission)?;
        }

        info!(
            comments = dump.comments.len(),
            submissions = dump.submissions.len(),
            observations = self.observations.len(),
            "Posts processed"
        );
        if !self.sentiments.is_empty() {
            let mean = self.sentiments.iter().sum::<f64>() / self.sentiments.len() as f64;
            debug!(chunks = self.sentiments.len(), mean_sentiment = mean, "Sentiment");
        }

        self.finish()
    }

    fn process_comment(&mut self, comment: &'a Comment) -> Result<()> {
        let timestamp = self.post_time(comment.created_utc)?;
        self.buckets.record(timestamp, PostKind::Comment, comment.score)?;
        self.comment_times.push(timestamp);
        self.comments.track(comment);
        self.comments_gilded += comment.gilded;
        self.classifier.classify_comment(comment);

        let text = sanitize(&comment.text);
        self.corpus.push(text.to_lowercase());
        self.scorer.update(&text);

        if !self.table.ignores_text(&comment.subreddit) && mentions_self(&text) {
            self.extract(&text, &comment.permalink);
        }
        Ok(())
    }

    fn process_submission(&mut self, submission: &'a Submission) -> Result<()> {
        let timestamp = self.post_time(submission.created_utc)?;
        self.buckets
            .record(timestamp, PostKind::Submission, submission.score)?;
        self.submission_times.push(timestamp);
        self.submissions.track(submission);
        self.submissions_gilded += submission.gilded;
        self.classifier.classify_submission(submission);

        if !submission.is_self {
            return Ok(());
        }

        let text = sanitize(&submission.text);
        self.corpus.push(text.to_lowercase());

        if !self.table.ignores_text(&submission.subreddit) && mentions_self(&text) {
            self.extract(&text, &submission.permalink);
        }
        Ok(())
    }

    /// Rejects posts made after `now`.
    fn post_time(&self, created_utc: i64) -> Result<DateTime<Utc>> {
        let timestamp = to_datetime(created_utc)?;
        if timestamp > self.config.now {
            return Err(ProfileError::FutureTimestamp {
                timestamp: created_utc,
            });
        }
        Ok(timestamp)
    }

    fn extract(&mut self, text: &str, source: &str) {
        let extraction = self.extractor.extract_chunks(text);
        self.sentiments.extend(extraction.sentiments);
        for chunk in &extraction.chunks {
            self.loader.load(&mut self.observations, chunk, source);
        }
    }

    fn finish(self) -> Result<Report> {
        let about = &self.dump.about;

        let lurk_period = lurk::detect(
            &self.comment_times,
            &self.submission_times,
            self.config.now,
            self.config.gap_measure,
        )?;
        let first_post_date = self
            .comment_times
            .iter()
            .chain(self.submission_times.iter())
            .min()
            .map(|t| t.timestamp())
            .ok_or(ProfileError::NoData)?;

        let synthesizer = Synthesizer::new(self.table, self.config.thresholds);
        let derived = synthesizer.derive_attributes(
            &self.classifier.commented_subreddits(),
            &self.classifier.submitted_subreddits(),
            &self.observations,
        );
        let synopsis = synthesizer.synopsis(
            &self.observations,
            &derived,
            &self.classifier.posted_subreddits(),
        );

        let corpus = self.corpus.join(" ");
        let total_word_count = self.extractor.total_word_count(&corpus);
        let unique_word_count = self.extractor.unique_word_count(&corpus);
        let words = self.extractor.common_words(&corpus);

        let comment_karma = self.buckets.total_comment_karma();
        let submission_karma = self.buckets.total_submission_karma();
        let comment_count = self.dump.comments.len();
        let submission_count = self.dump.submissions.len();

        let breakdowns = self.classifier.breakdowns();

        let comment_ref = |c: Option<&Comment>| CommentRef {
            text: c.map(|c| c.text.clone()),
            permalink: c.map(|c| c.permalink.clone()),
        };
        let submission_ref = |s: Option<&Submission>| SubmissionRef {
            title: s.map(|s| s.title.clone()),
            permalink: s.map(|s| s.permalink.clone()),
        };

        let report = Report {
            username: about.name.clone(),
            version: REPORT_VERSION,
            metadata: Metadata {
                reddit_id: about.reddit_id.clone(),
                is_mod: about.is_mod,
                latest_comment_id: self.comments.latest.map(|c| c.id.clone()),
                earliest_comment_id: self.comments.earliest.map(|c| c.id.clone()),
                latest_submission_id: self.submissions.latest.map(|s| s.id.clone()),
                earliest_submission_id: self.submissions.earliest.map(|s| s.id.clone()),
            },
            summary: Summary {
                signup_date: about.created_utc,
                first_post_date,
                lurk_period,
                comments: CommentSummary {
                    count: comment_count,
                    gilded: self.comments_gilded,
                    best: comment_ref(self.comments.best),
                    worst: comment_ref(self.comments.worst),
                    all_time_karma: about.comment_karma,
                    computed_karma: comment_karma,
                    average_karma: round2(ratio(comment_karma as f64, comment_count as f64)),
                    total_word_count,
                    unique_word_count,
                    hours_typed: hours_typed(total_word_count, self.config.words_per_minute),
                    karma_per_word: round2(ratio(
                        comment_karma as f64,
                        total_word_count as f64,
                    )),
                },
                submissions: SubmissionSummary {
                    count: submission_count,
                    gilded: self.submissions_gilded,
                    best: submission_ref(self.submissions.best),
                    worst: submission_ref(self.submissions.worst),
                    all_time_karma: about.link_karma,
                    computed_karma: submission_karma,
                    average_karma: round2(ratio(
                        submission_karma as f64,
                        submission_count as f64,
                    )),
                    type_domain_breakdown: breakdowns.type_domain,
                },
            },
            anti_sociality: self.scorer.summary(),
            synopsis,
            metrics: Metrics {
                date: date_metrics(&self.buckets.dates),
                hour: hour_metrics(&self.buckets.hours),
                weekday: weekday_metrics(&self.buckets.weekdays),
                subreddit: breakdowns.subreddit,
                topic: breakdowns.topic,
                common_words: common_words(&words, self.config.common_words),
                recent_activity_heatmap: heatmap_string(&self.buckets.heatmap),
                recent_karma: self.buckets.recent_karma,
                recent_posts: self.buckets.recent_posts,
            },
        };

        info!(
            username = %report.username,
            synopsis_categories = report.synopsis.len(),
            "Profile built"
        );
        Ok(report)
    }
}

/// Profiles `dump` with the dictionary-driven text collaborators.
pub fn profile(
    dump: &AccountDump,
    table: &SubredditTable,
    config: &ProfileConfig,
) -> Result<Report> {
    let extractor = LexiconExtractor::new();
    let loader = HeuristicAttributeLoader::new();
    let mut scorer = LexiconInsultScorer::new();

    ProfileEngine::new(dump, table, config, &extractor, &loader, &mut scorer)?.run()
}
