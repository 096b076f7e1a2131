//! Text-side collaborators of the profile engine.
//!
//! The engine only depends on the traits declared here. [`LexiconExtractor`],
//! [`HeuristicAttributeLoader`] and [`LexiconInsultScorer`] are the
//! dictionary-driven implementations the CLI uses.

mod heuristics;
mod insults;
mod lexicon;

pub use heuristics::HeuristicAttributeLoader;
pub use insults::LexiconInsultScorer;
pub use lexicon::LexiconExtractor;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::analyzers::observations::Observations;

/// A first-person fragment of a post handed to the attribute loader.
#[derive(Debug, Clone, PartialEq)]
pub struct Chunk {
    pub text: String,
}

/// Output of [`TextExtractor::extract_chunks`].
#[derive(Debug, Default)]
pub struct Extraction {
    pub chunks: Vec<Chunk>,
    pub sentiments: Vec<f64>,
}

/// Splits text into chunks and provides corpus-wide word statistics.
pub trait TextExtractor {
    fn extract_chunks(&self, text: &str) -> Extraction;

    /// Words of the corpus worth counting, in corpus order, repeats included.
    fn common_words(&self, corpus: &str) -> Vec<String>;

    fn total_word_count(&self, corpus: &str) -> u64;

    fn unique_word_count(&self, corpus: &str) -> u64;
}

/// Appends attribute observations found in a chunk.
pub trait AttributeLoader {
    fn load(&self, observations: &mut Observations, chunk: &Chunk, source: &str);
}

/// Accumulates insult likelihood over every comment of the account.
pub trait InsultScorer {
    fn update(&mut self, text: &str);

    fn summary(&self) -> InsultSummary;
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InsultSummary {
    pub percentage_insults: f64,
    pub highest_likelihood_insulting_comment: Option<String>,
}

static FIRST_PERSON: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\b(i|my)\b").unwrap());
static MARKDOWN_LINK: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[([^\]]*)\]\([^)]*\)").unwrap());
static BARE_URL: Lazy<Regex> = Lazy::new(|| Regex::new(r"https?://\S+").unwrap());
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[ \t]+").unwrap());

/// Returns `true` if the text talks about its author ("I" or "my").
pub fn mentions_self(text: &str) -> bool {
    FIRST_PERSON.is_match(text)
}

/// Strips quoted lines, links and markup noise from post text.
pub fn sanitize(text: &str) -> String {
    let unquoted = text
        .lines()
        .filter(|line| !line.trim_start().starts_with('>'))
        .collect::<Vec<_>>()
        .join("\n");

    let delinked = MARKDOWN_LINK.replace_all(&unquoted, "$1");
    let no_urls = BARE_URL.replace_all(&delinked, "");
    let cleaned = no_urls.replace("&amp;", "&").replace("&gt;", ">").replace("&lt;", "<");

    WHITESPACE.replace_all(cleaned.trim(), " ").into_owned()
}
