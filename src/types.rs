//! Core types for webscrap

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Upper bound on the number of keywords kept per website
pub const MAX_KEYWORDS: usize = 10;

/// Title stored when the page has neither `<title>` nor `<h1>` text
pub const FALLBACK_TITLE: &str = "No Title";

/// Description stored when the page has no meta description and no `<p>` text
pub const FALLBACK_DESCRIPTION: &str = "No Description";

/// A website as persisted by the store.
///
/// At most one record exists per canonical hostname.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebsiteRecord {
    /// Store-assigned identifier
    pub id: Uuid,
    /// Page title (never empty)
    pub title: String,
    /// Page description (never empty)
    pub description: String,
    /// URL as originally requested
    pub url: String,
    /// Canonical hostname, used as the dedup key
    pub hostname: String,
    /// Most frequent body terms, most frequent first
    #[serde(default)]
    pub keywords: Vec<String>,
    /// When the record was inserted
    pub created_at: DateTime<Utc>,
    /// When the record was last mutated
    pub updated_at: DateTime<Utc>,
}

/// Candidate record built by the scrape pipeline, before the store assigns
/// identity and timestamps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewWebsite {
    pub title: String,
    pub description: String,
    pub url: String,
    pub hostname: String,
    pub keywords: Vec<String>,
}

impl NewWebsite {
    /// Create a candidate with no keywords
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        url: impl Into<String>,
        hostname: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            url: url.into(),
            hostname: hostname.into(),
            keywords: Vec::new(),
        }
    }

    /// Set the keyword list, keeping at most [`MAX_KEYWORDS`]
    pub fn with_keywords(mut self, mut keywords: Vec<String>) -> Self {
        keywords.truncate(MAX_KEYWORDS);
        self.keywords = keywords;
        self
    }

    /// Key used for case-insensitive hostname matching
    pub fn hostname_key(&self) -> String {
        self.hostname.to_lowercase()
    }

    /// Turn the candidate into a record stamped with `now`
    pub fn into_record(self, now: DateTime<Utc>) -> WebsiteRecord {
        WebsiteRecord {
            id: Uuid::new_v4(),
            title: self.title,
            description: self.description,
            url: self.url,
            hostname: self.hostname,
            keywords: self.keywords,
            created_at: now,
            updated_at: now,
        }
    }
}
