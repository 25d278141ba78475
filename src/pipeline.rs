//! Scrape pipeline
//!
//! Orchestrates one request end to end:
//! URL → canonical hostname → fetch → parse → keywords → dedup/persist.
//! Every failure comes back as a [`ScrapeError`]; the HTTP layer turns each
//! variant into a response.

use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::scraping::{
    canonical_hostname, ContentExtractor, FetchEngine, FetchError, InvalidUrlError,
    KeywordExtractor,
};
use crate::store::{StoreError, StoreOutcome, WebsiteGateway, WebsiteStore};
use crate::types::{NewWebsite, WebsiteRecord};

/// Message returned when the hostname is already recorded
pub const CONFLICT_MESSAGE: &str = "Website data already exists.";

/// Errors surfaced by the scrape pipeline
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("{0}")]
    BadRequest(String),
    #[error(transparent)]
    InvalidUrl(#[from] InvalidUrlError),
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error("Website data already exists.")]
    Conflict { hostname: String },
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// A successfully scraped and stored website
#[derive(Debug, Clone)]
pub struct ScrapeOutcome {
    /// The newly stored record
    pub record: WebsiteRecord,
    /// Raw HTML as fetched
    pub html: String,
}

/// Fetch, extract and persist a single page
pub struct ScrapePipeline {
    fetcher: FetchEngine,
    extractor: ContentExtractor,
    keywords: KeywordExtractor,
    gateway: WebsiteGateway,
}

impl ScrapePipeline {
    /// Create a pipeline from its components
    pub fn new(
        fetcher: FetchEngine,
        extractor: ContentExtractor,
        keywords: KeywordExtractor,
        gateway: WebsiteGateway,
    ) -> Self {
        Self {
            fetcher,
            extractor,
            keywords,
            gateway,
        }
    }

    /// Build every component from configuration around an existing store
    pub fn from_config(config: &Config, store: Arc<dyn WebsiteStore>) -> Result<Self, FetchError> {
        Ok(Self::new(
            FetchEngine::new(config.scraping.fetch_config())?,
            ContentExtractor::new(config.scraping.extractor_config()),
            config.keywords.extractor(),
            WebsiteGateway::new(store),
        ))
    }

    /// Scrape `url` and store a record for its host.
    ///
    /// `None` or a blank URL is rejected before any network access.
    pub async fn run(&self, url: Option<&str>) -> Result<ScrapeOutcome, ScrapeError> {
        let url = url
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .ok_or_else(|| ScrapeError::BadRequest("Missing required field 'url'".to_string()))?;

        let hostname = canonical_hostname(url)?;
        debug!("Scraping {} (hostname {})", url, hostname);

        let fetched = self.fetcher.fetch(url).await.map_err(|e| {
            warn!("Fetch of {} failed: {}", url, e);
            e
        })?;

        let page = self.extractor.parse(&fetched.body);
        let keywords = self.keywords.extract(&page.body_text);
        debug!(
            "Parsed {}: title={:?}, {} keywords",
            url,
            page.title,
            keywords.len()
        );

        let candidate = NewWebsite::new(page.title, page.description, url, hostname.clone())
            .with_keywords(keywords);

        match self.gateway.check_and_store(candidate).await? {
            StoreOutcome::Stored(record) => {
                info!("Scraped {} in {}ms", url, fetched.fetch_duration.as_millis());
                Ok(ScrapeOutcome {
                    record,
                    html: fetched.body,
                })
            }
            StoreOutcome::Conflict => Err(ScrapeError::Conflict { hostname }),
        }
    }

    /// Dedup/persist gateway used by this pipeline
    pub fn gateway(&self) -> &WebsiteGateway {
        &self.gateway
    }
}
