//! webscrap: single-page website metadata scraper
//!
//! Fetches a page by URL, extracts its title, description and most frequent
//! keywords, and stores one record per canonical hostname:
//! - Fetching over HTTP(S) via reqwest
//! - Permissive HTML parsing via scraper
//! - Frequency-ranked keyword extraction with stopword filtering
//! - A JSON-file-backed store that enforces hostname uniqueness
//! - An axum HTTP API (`/api/web/scrap`)

pub mod config;
pub mod http;
pub mod pipeline;
pub mod scraping;
pub mod store;
pub mod types;
pub mod util;

pub use config::Config;
pub use pipeline::{ScrapeError, ScrapeOutcome, ScrapePipeline};
pub use types::*;
