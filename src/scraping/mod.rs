//! Single-page scraping
//!
//! Everything needed to turn a URL into website metadata:
//! - `FetchEngine`: HTTP(S) fetch of the raw page
//! - `ContentExtractor`: title, description and body text from HTML
//! - `KeywordExtractor`: frequency-ranked terms from body text
//! - `get_hostname` / `normalize_hostname`: the dedup key for a URL

pub mod extractor;
pub mod fetcher;
pub mod keywords;

pub use extractor::{ContentExtractor, ParsedPage};
pub use fetcher::{FetchEngine, FetchError, FetchResult};
pub use keywords::KeywordExtractor;

use thiserror::Error;
use url::Url;

/// A string that cannot be used as a website URL
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidUrlError {
    #[error("Invalid URL '{url}': {reason}")]
    Malformed { url: String, reason: String },
    #[error("URL '{0}' has no host")]
    MissingHost(String),
}

/// Parse `url` and return its host component.
///
/// The `url` crate already lowercases hosts of special schemes, but the
/// caller should still run the result through [`normalize_hostname`].
pub fn get_hostname(url: &str) -> Result<String, InvalidUrlError> {
    let parsed = Url::parse(url.trim()).map_err(|e| InvalidUrlError::Malformed {
        url: url.to_string(),
        reason: e.to_string(),
    })?;

    match parsed.host_str() {
        Some(host) if !host.is_empty() => Ok(host.to_string()),
        _ => Err(InvalidUrlError::MissingHost(url.to_string())),
    }
}

/// Canonicalize a host: lowercase, then strip one leading `www.`
pub fn normalize_hostname(host: &str) -> String {
    let lower = host.trim().to_lowercase();
    match lower.strip_prefix("www.") {
        Some(stripped) => stripped.to_string(),
        None => lower,
    }
}

/// Canonical hostname of a URL, the key websites are deduplicated on
pub fn canonical_hostname(url: &str) -> Result<String, InvalidUrlError> {
    get_hostname(url).map(|host| normalize_hostname(&host))
}
