//! Normalized account records consumed by the profile engine.
//!
//! An account dump is a JSON document holding the account's `about` block
//! plus its comments and submissions, newest first.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer};

use crate::error::{ProfileError, Result};

/// Account metadata from the `about` endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct AccountMeta {
    pub name: String,
    #[serde(rename = "id")]
    pub reddit_id: String,
    #[serde(deserialize_with = "epoch_seconds")]
    pub created_utc: i64,
    pub link_karma: i64,
    pub comment_karma: i64,
    #[serde(default)]
    pub is_mod: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Comment {
    pub id: String,
    pub subreddit: String,
    pub text: String,
    #[serde(deserialize_with = "epoch_seconds")]
    pub created_utc: i64,
    pub score: i64,
    pub permalink: String,
    #[serde(default)]
    pub gilded: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Submission {
    pub id: String,
    pub subreddit: String,
    #[serde(default)]
    pub text: String,
    #[serde(deserialize_with = "epoch_seconds")]
    pub created_utc: i64,
    pub score: i64,
    pub permalink: String,
    pub url: String,
    pub title: String,
    pub is_self: bool,
    #[serde(default)]
    pub gilded: u64,
    pub domain: String,
}

/// What the superlative tracker ranks posts by.
pub trait Post {
    fn score(&self) -> i64;
}

macro_rules! impl_post {
    ($ty:ty) => {
        impl Post for $ty {
            fn score(&self) -> i64 {
                self.score
            }
        }
    };
}

impl_post!(Comment);
impl_post!(Submission);

/// Everything the engine needs about one account.
#[derive(Debug, Clone, Deserialize)]
pub struct AccountDump {
    pub about: AccountMeta,
    #[serde(default)]
    pub comments: Vec<Comment>,
    #[serde(default)]
    pub submissions: Vec<Submission>,
}

impl AccountDump {
    /// Parses a JSON account dump.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }

    pub fn is_empty(&self) -> bool {
        self.comments.is_empty() && self.submissions.is_empty()
    }
}

/// Converts epoch seconds into a UTC timestamp.
pub fn to_datetime(timestamp: i64) -> Result<DateTime<Utc>> {
    Utc.timestamp_opt(timestamp, 0)
        .single()
        .ok_or(ProfileError::InvalidTimestamp { timestamp })
}

// Reddit reports `created_utc` as a float.
fn epoch_seconds<'de, D>(deserializer: D) -> std::result::Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = f64::deserialize(deserializer)?;
    Ok(value.trunc() as i64)
}
