//! Content extraction types

use thiserror::Error;

/// Errors during content extraction.
///
/// Parsing is permissive and degrades to fallback values, so nothing in the
/// extractor currently returns this.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Failed to parse HTML")]
    Malformed,
}

/// Metadata parsed from a page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedPage {
    /// Page title, or the fallback title
    pub title: String,
    /// Page description, or the fallback description
    pub description: String,
    /// Visible text of the body, whitespace collapsed
    pub body_text: String,
}

/// Configuration for content extraction
#[derive(Debug, Clone)]
pub struct ExtractorConfig {
    /// Maximum length in characters of a description taken from a paragraph
    pub max_description_chars: usize,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            max_description_chars: 160,
        }
    }
}
