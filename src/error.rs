use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProfileError {
    #[error("Account has no comments or submissions")]
    NoData,

    #[error("No date bucket for {year}-{month:02}; buckets must span signup month to today")]
    MissingDateBucket { year: i32, month: u32 },

    #[error("No timeline qualified for lurk period detection")]
    NoLurkCandidate,

    #[error("Invalid timestamp: {timestamp}")]
    InvalidTimestamp { timestamp: i64 },

    #[error("Post at {timestamp} is later than the profile time")]
    FutureTimestamp { timestamp: i64 },

    #[error("Subreddit table error: {0}")]
    Table(#[from] csv::Error),

    #[error("Invalid subreddit table row {line}: {reason}")]
    TableRow { line: u64, reason: String },

    #[error("Account dump error: {0}")]
    Dump(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ProfileError>;
