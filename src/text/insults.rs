use once_cell::sync::Lazy;
use regex::Regex;

use super::{InsultScorer, InsultSummary};
use crate::analyzers::utility::round2;

static WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"[A-Za-z']+").unwrap());

static INSULTS: &[&str] = &[
    "idiot", "moron", "stupid", "dumb", "loser", "pathetic", "retard", "retarded", "imbecile",
    "clown", "dumbass", "jackass", "asshole", "scum", "worthless", "ignorant", "troll",
];

static SECOND_PERSON: &[&str] = &["you", "you're", "your", "ur", "u", "yourself"];

/// Likelihood at or above which a comment counts as an insult.
const INSULT_CUTOFF: f64 = 0.5;

/// Lexicon-based [`InsultScorer`].
///
/// A comment's likelihood grows with each insult word and is boosted when the
/// comment addresses someone directly.
#[derive(Debug, Default)]
pub struct LexiconInsultScorer {
    scored: u64,
    insults: u64,
    most_likely: Option<(f64, String)>,
}

impl LexiconInsultScorer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn likelihood(text: &str) -> f64 {
        let mut hits = 0u32;
        let mut addressed = false;
        for word in WORD.find_iter(text) {
            let word = word.as_str().to_lowercase();
            if INSULTS.contains(&word.as_str()) {
                hits += 1;
            } else if SECOND_PERSON.contains(&word.as_str()) {
                addressed = true;
            }
        }
        if hits == 0 {
            return 0.0;
        }
        let boost = if addressed { 0.25 } else { 0.0 };
        (0.35 * hits as f64 + boost).min(1.0)
    }
}

impl InsultScorer for LexiconInsultScorer {
    fn update(&mut self, text: &str) {
        self.scored += 1;
        let likelihood = Self::likelihood(text);
        if likelihood >= INSULT_CUTOFF {
            self.insults += 1;
        }
        let is_new_max = match &self.most_likely {
            Some((best, _)) => likelihood > *best,
            None => likelihood > 0.0,
        };
        if is_new_max {
            self.most_likely = Some((likelihood, text.to_string()));
        }
    }

    fn summary(&self) -> InsultSummary {
        let percentage = if self.scored == 0 {
            0.0
        } else {
            self.insults as f64 / self.scored as f64 * 100.0
        };
        InsultSummary {
            percentage_insults: round2(percentage),
            highest_likelihood_insulting_comment: self
                .most_likely
                .as_ref()
                .map(|(_, text)| text.clone()),
        }
    }
}
