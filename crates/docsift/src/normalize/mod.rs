//! Text normalization applied before categorization.
//!
//! Lowercases, drops decimal digits and ASCII punctuation, splits on whitespace and
//! filters stopwords. The result is a single-space separated token string.

pub mod stopwords;

use std::sync::{Arc, LazyLock};

use regex::Regex;

pub use stopwords::StopWords;

/// Unicode decimal digits (`Nd`). Superscripts, fractions and roman
/// numerals are not matched.
static RE_DIGIT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d").unwrap());

/// Normalizes `text` against the given stopword set.
///
/// Pure and idempotent: `normalize(&normalize(x, s), s) == normalize(x, s)`.
pub fn normalize(text: &str, stopwords: &StopWords) -> String {
    let lowered = text.to_lowercase();
    let cleaned: String = RE_DIGIT
        .replace_all(&lowered, "")
        .chars()
        .filter(|c| !c.is_ascii_punctuation())
        .collect();

    cleaned
        .split_whitespace()
        .filter(|token| !stopwords.contains(token))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Shared normalizer holding the process-wide stopword set.
#[derive(Debug, Clone)]
pub struct Normalizer {
    stopwords: Arc<StopWords>,
}

impl Normalizer {
    pub fn new(stopwords: Arc<StopWords>) -> Self {
        Self { stopwords }
    }

    pub fn normalize(&self, text: &str) -> String {
        normalize(text, &self.stopwords)
    }

    pub fn stopwords(&self) -> &StopWords {
        &self.stopwords
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new(Arc::new(StopWords::english()))
    }
}
