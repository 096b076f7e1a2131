//! Profile aggregation.
//!
//! This module buckets an account's posts over time, classifies them into
//! subreddit and topic trees, finds the longest period of inactivity and
//! synthesizes attribute observations into the final report.

pub mod buckets;
pub mod classify;
pub mod engine;
pub mod lurk;
pub mod observations;
pub mod report;
pub mod rules;
pub mod summarize;
pub mod synopsis;
pub mod tree;
pub mod types;
pub mod utility;
