//! Body text extraction

use scraper::{ElementRef, Html};

use super::ContentExtractor;
use crate::util::collapse_whitespace;

/// Elements whose text never reaches the reader
const SKIPPED_ELEMENTS: &[&str] = &["script", "style", "noscript", "template"];

impl ContentExtractor {
    /// Visible text of `<body>`, whitespace collapsed. Empty without a body.
    pub(super) fn extract_body_text(&self, document: &Html) -> String {
        let Some(selector) = self.body_selector.as_ref() else {
            return String::new();
        };
        let Some(body) = document.select(selector).next() else {
            return String::new();
        };

        let mut pieces = Vec::new();
        Self::collect_text(body, &mut pieces);
        collapse_whitespace(&pieces.join(" "))
    }

    /// Walk an element depth-first, pushing every text node outside skipped elements
    fn collect_text<'a>(element: ElementRef<'a>, pieces: &mut Vec<&'a str>) {
        for child in element.children() {
            if let Some(text) = child.value().as_text() {
                let trimmed = text.trim();
                if !trimmed.is_empty() {
                    pieces.push(trimmed);
                }
            } else if let Some(child_elem) = ElementRef::wrap(child) {
                if !SKIPPED_ELEMENTS.contains(&child_elem.value().name()) {
                    Self::collect_text(child_elem, pieces);
                }
            }
        }
    }
}
