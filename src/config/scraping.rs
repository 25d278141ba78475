//! Fetching, extraction, keyword and store configuration

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use super::DEFAULT_USER_AGENT;
use crate::scraping::extractor::ExtractorConfig;
use crate::scraping::fetcher::FetchConfig;
use crate::scraping::KeywordExtractor;
use crate::types::MAX_KEYWORDS;

/// Page fetching and content extraction configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrapingConfig {
    /// User agent string
    pub user_agent: String,
    /// Request timeout (seconds); unset means no timeout
    pub timeout_secs: Option<u64>,
    /// Maximum redirects followed by the HTTP client (0 disables following)
    pub max_redirects: usize,
    /// Maximum response size (bytes)
    pub max_content_size: usize,
    /// Maximum description length when taken from a paragraph (characters)
    pub max_description_chars: usize,
    /// Hostnames pinned to fixed addresses instead of DNS
    pub resolve: HashMap<String, SocketAddr>,
}

impl ScrapingConfig {
    /// Runtime settings for the fetch engine
    pub fn fetch_config(&self) -> FetchConfig {
        FetchConfig {
            user_agent: self.user_agent.clone(),
            timeout: self.timeout_secs.map(Duration::from_secs),
            max_redirects: self.max_redirects,
            max_content_size: self.max_content_size,
            resolve: self.resolve.clone(),
        }
    }

    /// Runtime settings for the content extractor
    pub fn extractor_config(&self) -> ExtractorConfig {
        ExtractorConfig {
            max_description_chars: self.max_description_chars,
        }
    }
}

impl Default for ScrapingConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: None,
            max_redirects: 0,
            max_content_size: 10 * 1024 * 1024,
            max_description_chars: 160,
            resolve: HashMap::new(),
        }
    }
}

/// Keyword extraction configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct KeywordConfig {
    /// Number of keywords kept per website (at most 10)
    pub max_keywords: usize,
    /// Stopwords added to the built-in list
    pub extra_stopwords: Vec<String>,
}

impl KeywordConfig {
    /// Build the keyword extractor described by this config
    pub fn extractor(&self) -> KeywordExtractor {
        KeywordExtractor::new(self.max_keywords, &self.extra_stopwords)
    }
}

impl Default for KeywordConfig {
    fn default() -> Self {
        Self {
            max_keywords: MAX_KEYWORDS,
            extra_stopwords: Vec::new(),
        }
    }
}

/// Website store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// JSON file holding website records
    pub path: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("data/websites.json"),
        }
    }
}
