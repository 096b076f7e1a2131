pub mod analyzers;
pub mod config;
pub mod error;
pub mod output;
pub mod posts;
pub mod source;
pub mod subreddits;
pub mod text;

pub use analyzers::engine::{ProfileEngine, profile};
pub use config::ProfileConfig;
pub use error::{ProfileError, Result};
