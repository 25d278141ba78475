//! Fetch engine for single-page scraping
//!
//! One GET per call, no retries. The transport (TLS or plain TCP) follows the
//! URL scheme. The response body is streamed and concatenated into one string.

use futures::StreamExt;
use reqwest::StatusCode;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::debug;
use url::Url;

use crate::config::DEFAULT_USER_AGENT;

/// Errors that can occur during fetching
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Failed to fetch page, status code: {0}")]
    Status(u16),
    #[error("Failed to parse URL: {0}")]
    InvalidUrl(String),
    #[error("Unsupported URL scheme: {0}")]
    UnsupportedScheme(String),
    #[error("Content too large: {0} bytes")]
    ContentTooLarge(usize),
}

/// Result of a successful fetch
#[derive(Debug, Clone)]
pub struct FetchResult {
    /// The fetched URL (differs from the request only when redirects are enabled)
    pub final_url: Url,
    /// HTTP status code (always 200)
    pub status_code: u16,
    /// Content type header, empty if absent
    pub content_type: String,
    /// Response body
    pub body: String,
    /// Time taken to fetch
    pub fetch_duration: Duration,
}

impl FetchResult {
    /// Check if this is HTML content
    pub fn is_html(&self) -> bool {
        self.content_type.contains("text/html") || self.content_type.contains("application/xhtml")
    }
}

/// Configuration for the fetch engine
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// User agent string
    pub user_agent: String,
    /// Whole-request timeout, `None` leaves requests unbounded
    pub timeout: Option<Duration>,
    /// Redirects the transport follows on its own; 0 turns a 3xx into a status error
    pub max_redirects: usize,
    /// Maximum response size (bytes)
    pub max_content_size: usize,
    /// Static host overrides that bypass DNS, like `curl --resolve`
    pub resolve: HashMap<String, SocketAddr>,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: None,
            max_redirects: 0,
            max_content_size: 10 * 1024 * 1024, // 10 MB
            resolve: HashMap::new(),
        }
    }
}

/// HTTP fetch engine
pub struct FetchEngine {
    http_client: reqwest::Client,
    config: FetchConfig,
}

impl FetchEngine {
    /// Create a new fetch engine
    pub fn new(config: FetchConfig) -> Result<Self, FetchError> {
        let redirect = match config.max_redirects {
            0 => reqwest::redirect::Policy::none(),
            max => reqwest::redirect::Policy::limited(max),
        };

        let mut builder = reqwest::Client::builder()
            .pool_idle_timeout(Duration::from_secs(90))
            .redirect(redirect)
            .user_agent(&config.user_agent)
            .gzip(true)
            .brotli(true);

        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        for (host, addr) in &config.resolve {
            builder = builder.resolve(host, *addr);
        }

        Ok(Self {
            http_client: builder.build()?,
            config,
        })
    }

    /// Fetch a page and return its body as text.
    ///
    /// Fails unless the final response status is exactly 200.
    pub async fn fetch(&self, url: &str) -> Result<FetchResult, FetchError> {
        let url = Url::parse(url.trim()).map_err(|e| FetchError::InvalidUrl(e.to_string()))?;
        match url.scheme() {
            "http" | "https" => {}
            other => return Err(FetchError::UnsupportedScheme(other.to_string())),
        }

        let start = Instant::now();
        let response = self.http_client.get(url.as_str()).send().await?;

        let status = response.status();
        if status != StatusCode::OK {
            debug!("Fetch of {} returned status {}", url, status);
            return Err(FetchError::Status(status.as_u16()));
        }

        if let Some(len) = response.content_length() {
            if len as usize > self.config.max_content_size {
                return Err(FetchError::ContentTooLarge(len as usize));
            }
        }

        let final_url = response.url().clone();
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();

        let mut body = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            if body.len() + chunk.len() > self.config.max_content_size {
                return Err(FetchError::ContentTooLarge(body.len() + chunk.len()));
            }
            body.extend_from_slice(&chunk);
        }

        let fetch_duration = start.elapsed();
        debug!(
            "Fetched {} ({} bytes) in {}ms",
            final_url,
            body.len(),
            fetch_duration.as_millis()
        );

        Ok(FetchResult {
            final_url,
            status_code: status.as_u16(),
            content_type,
            body: String::from_utf8_lossy(&body).into_owned(),
            fetch_duration,
        })
    }
}
