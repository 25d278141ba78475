//! Content extraction from HTML
//!
//! Pulls the three things a website record needs out of a page:
//! - title (`<title>`, then the first `<h1>`)
//! - description (meta description, then the first `<p>`)
//! - body text for keyword extraction
//!
//! html5ever tolerates any markup, so extraction never fails; missing pieces
//! fall back to fixed placeholder strings.

mod metadata;
mod text;
mod types;

pub use types::*;

use scraper::{Html, Selector};

/// Content extractor
pub struct ContentExtractor {
    pub(crate) config: ExtractorConfig,
    pub(crate) title_selector: Option<Selector>,
    pub(crate) heading_selector: Option<Selector>,
    pub(crate) meta_selector: Option<Selector>,
    pub(crate) paragraph_selector: Option<Selector>,
    pub(crate) body_selector: Option<Selector>,
}

impl ContentExtractor {
    /// Create a new content extractor
    pub fn new(config: ExtractorConfig) -> Self {
        Self {
            config,
            title_selector: Selector::parse("title").ok(),
            heading_selector: Selector::parse("h1").ok(),
            meta_selector: Selector::parse("meta[name]").ok(),
            paragraph_selector: Selector::parse("p").ok(),
            body_selector: Selector::parse("body").ok(),
        }
    }

    /// Parse title, description and body text out of raw HTML
    pub fn parse(&self, html: &str) -> ParsedPage {
        let document = Html::parse_document(html);

        ParsedPage {
            title: self.extract_title(&document),
            description: self.extract_description(&document),
            body_text: self.extract_body_text(&document),
        }
    }
}

impl Default for ContentExtractor {
    fn default() -> Self {
        Self::new(ExtractorConfig::default())
    }
}
