//! Title and description extraction

use scraper::{ElementRef, Html, Selector};

use super::ContentExtractor;
use crate::types::{FALLBACK_DESCRIPTION, FALLBACK_TITLE};
use crate::util::{collapse_whitespace, truncate_chars};

impl ContentExtractor {
    /// Extract the title: first non-empty `<title>`, then the first `<h1>`,
    /// then the fallback
    pub(super) fn extract_title(&self, document: &Html) -> String {
        if let Some(title) = first_non_empty_text(document, self.title_selector.as_ref()) {
            return title;
        }

        if let Some(heading) = first_text(document, self.heading_selector.as_ref()) {
            return heading;
        }

        FALLBACK_TITLE.to_string()
    }

    /// Extract the description: meta description, then the first `<p>`
    /// truncated, then the fallback
    pub(super) fn extract_description(&self, document: &Html) -> String {
        if let Some(description) = self.meta_description(document) {
            return description;
        }

        if let Some(paragraph) = first_text(document, self.paragraph_selector.as_ref()) {
            return truncate_chars(&paragraph, self.config.max_description_chars);
        }

        FALLBACK_DESCRIPTION.to_string()
    }

    /// Trimmed `content` of the first `<meta name="description">`, if non-empty
    fn meta_description(&self, document: &Html) -> Option<String> {
        let selector = self.meta_selector.as_ref()?;

        let meta = document.select(selector).find(|elem| {
            elem.value()
                .attr("name")
                .is_some_and(|name| name.trim().eq_ignore_ascii_case("description"))
        })?;

        let content = meta.value().attr("content")?.trim();
        if content.is_empty() {
            None
        } else {
            Some(content.to_string())
        }
    }
}

/// Whitespace-collapsed text of the first element matching `selector`, if non-empty
fn first_text(document: &Html, selector: Option<&Selector>) -> Option<String> {
    let elem = document.select(selector?).next()?;
    Some(element_text(elem)).filter(|text| !text.is_empty())
}

/// Text of the first element matching `selector` whose text is non-empty
fn first_non_empty_text(document: &Html, selector: Option<&Selector>) -> Option<String> {
    document
        .select(selector?)
        .map(element_text)
        .find(|text| !text.is_empty())
}

fn element_text(elem: ElementRef<'_>) -> String {
    collapse_whitespace(&elem.text().collect::<String>())
}
