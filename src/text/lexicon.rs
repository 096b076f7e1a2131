use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

use super::{Chunk, Extraction, TextExtractor, mentions_self};

static SENTENCE_BREAK: Lazy<Regex> = Lazy::new(|| Regex::new(r"[.!?;\n]+").unwrap());
static WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"[A-Za-z][A-Za-z']*").unwrap());

static STOPWORDS: &[&str] = &[
    "about", "after", "again", "all", "also", "and", "any", "are", "because", "been", "before",
    "being", "but", "can", "could", "did", "does", "doing", "don't", "for", "from", "had", "has",
    "have", "her", "here", "him", "his", "how", "i'm", "i've", "into", "it's", "its", "just",
    "like", "more", "most", "not", "now", "only", "other", "our", "out", "over", "really", "same",
    "she", "should", "some", "such", "than", "that", "that's", "the", "their", "them", "then",
    "there", "these", "they", "this", "those", "through", "too", "very", "was", "were", "what",
    "when", "where", "which", "while", "who", "why", "will", "with", "would", "you", "you're",
    "your",
];

static POSITIVE: &[&str] = &[
    "love", "great", "good", "awesome", "amazing", "happy", "nice", "best", "enjoy", "fun",
    "excellent", "glad", "wonderful", "thanks", "beautiful",
];

static NEGATIVE: &[&str] = &[
    "hate", "bad", "awful", "terrible", "worst", "sad", "angry", "annoying", "horrible", "sucks",
    "boring", "ugly", "stupid", "disappointed", "pain",
];

/// Dictionary-based [`TextExtractor`].
///
/// Chunks are the first-person sentences of a text; sentiment is the balance
/// of positive and negative lexicon words per chunk, in `[-1, 1]`.
#[derive(Debug, Default)]
pub struct LexiconExtractor;

impl LexiconExtractor {
    pub fn new() -> Self {
        Self
    }

    fn words(text: &str) -> impl Iterator<Item = String> + '_ {
        WORD.find_iter(text).map(|m| m.as_str().to_lowercase())
    }

    fn sentiment(sentence: &str) -> f64 {
        let mut total = 0usize;
        let mut balance = 0i64;
        for word in Self::words(sentence) {
            total += 1;
            if POSITIVE.contains(&word.as_str()) {
                balance += 1;
            } else if NEGATIVE.contains(&word.as_str()) {
                balance -= 1;
            }
        }
        if total == 0 {
            0.0
        } else {
            (balance as f64 / total as f64).clamp(-1.0, 1.0)
        }
    }
}

impl TextExtractor for LexiconExtractor {
    fn extract_chunks(&self, text: &str) -> Extraction {
        let mut extraction = Extraction::default();

        for sentence in SENTENCE_BREAK.split(text) {
            let sentence = sentence.trim();
            if sentence.is_empty() || !mentions_self(sentence) {
                continue;
            }
            extraction.sentiments.push(Self::sentiment(sentence));
            extraction.chunks.push(Chunk {
                text: sentence.to_string(),
            });
        }

        extraction
    }

    fn common_words(&self, corpus: &str) -> Vec<String> {
        Self::words(corpus)
            .filter(|w| w.len() >= 3 && !STOPWORDS.contains(&w.as_str()))
            .collect()
    }

    fn total_word_count(&self, corpus: &str) -> u64 {
        WORD.find_iter(corpus).count() as u64
    }

    fn unique_word_count(&self, corpus: &str) -> u64 {
        Self::words(corpus).collect::<HashSet<_>>().len() as u64
    }
}
