//! Keyword extraction by term frequency
//!
//! Tokens are runs of three or more ASCII letters after lowercasing. Tokens
//! with digits or punctuation inside them never match, which trades recall for
//! precision. Stopwords are dropped, the rest are counted and ranked.

use regex_lite::Regex;
use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

use crate::types::MAX_KEYWORDS;

static RE_WORD: OnceLock<Regex> = OnceLock::new();

/// Common English function words never reported as keywords
pub const DEFAULT_STOPWORDS: &[&str] = &[
    "the", "and", "for", "are", "but", "not", "you", "all", "any", "can",
    "was", "our", "has", "his", "her", "its", "who", "how", "out", "did",
    "that", "this", "with", "from", "they", "have", "were", "been", "will", "what",
    "when", "your", "which", "their", "there", "about", "would", "into", "more", "than",
];

/// Frequency-based keyword extractor
#[derive(Debug, Clone)]
pub struct KeywordExtractor {
    stopwords: HashSet<String>,
    max_keywords: usize,
}

impl KeywordExtractor {
    /// Create an extractor with the default stopwords plus `extra_stopwords`.
    ///
    /// `max_keywords` is capped at [`MAX_KEYWORDS`].
    pub fn new<I, S>(max_keywords: usize, extra_stopwords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let stopwords = DEFAULT_STOPWORDS
            .iter()
            .map(|w| w.to_string())
            .chain(extra_stopwords.into_iter().map(|w| w.as_ref().trim().to_lowercase()))
            .collect();

        Self {
            stopwords,
            max_keywords: max_keywords.min(MAX_KEYWORDS),
        }
    }

    /// Top keywords of `body_text`, most frequent first.
    ///
    /// Equal counts are ordered alphabetically so results are deterministic.
    pub fn extract(&self, body_text: &str) -> Vec<String> {
        let re = RE_WORD.get_or_init(|| Regex::new(r"\b[a-z]{3,}\b").unwrap());
        let text = body_text.to_lowercase();

        let mut counts: HashMap<&str, usize> = HashMap::new();
        for token in re.find_iter(&text).map(|m| m.as_str()) {
            if self.stopwords.contains(token) {
                continue;
            }
            *counts.entry(token).or_insert(0) += 1;
        }

        let mut ranked: Vec<(&str, usize)> = counts.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

        ranked
            .into_iter()
            .take(self.max_keywords)
            .map(|(token, _)| token.to_string())
            .collect()
    }

    /// Check whether a lowercase token is a stopword
    pub fn is_stopword(&self, token: &str) -> bool {
        self.stopwords.contains(token)
    }

    /// Number of keywords returned at most
    pub fn max_keywords(&self) -> usize {
        self.max_keywords
    }
}

impl Default for KeywordExtractor {
    fn default() -> Self {
        Self::new(MAX_KEYWORDS, std::iter::empty::<&str>())
    }
}
