//! HTTP API Request/Response Types
//!
//! JSON-serializable types for the HTTP API, plus the extractor that reads
//! the scrape target from JSON, form or query input.

use async_trait::async_trait;
use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
    http::header,
};
use serde::{Deserialize, Serialize};

use crate::pipeline::ScrapeError;
use crate::types::WebsiteRecord;

/// Scrape request.
///
/// The `url` may come from a JSON body, a form-encoded body or the query
/// string; a body value wins over the query string.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScrapRequest {
    /// Page to scrape
    #[serde(default)]
    pub url: Option<String>,
}

#[async_trait]
impl<S> FromRequest<S> for ScrapRequest
where
    S: Send + Sync,
{
    type Rejection = ScrapeError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let query_url = req
            .uri()
            .query()
            .and_then(|query| form_value(query.as_bytes(), "url"));

        let content_type = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_ascii_lowercase();

        let body = Bytes::from_request(req, state)
            .await
            .map_err(|e| ScrapeError::BadRequest(e.body_text()))?;

        let body_url = if body.iter().all(u8::is_ascii_whitespace) {
            None
        } else if content_type.starts_with("application/x-www-form-urlencoded") {
            form_value(&body, "url")
        } else {
            serde_json::from_slice::<ScrapRequest>(&body)
                .map_err(|e| ScrapeError::BadRequest(format!("Invalid JSON body: {}", e)))?
                .url
        };

        Ok(Self {
            url: body_url.or(query_url),
        })
    }
}

/// First value of `key` in form-encoded `input`
fn form_value(input: &[u8], key: &str) -> Option<String> {
    url::form_urlencoded::parse(input)
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.into_owned())
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Whether the service is healthy
    pub healthy: bool,
    /// Service version
    pub version: String,
}

/// Stored websites listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SitesResponse {
    /// Number of stored websites
    pub total: usize,
    /// Stored websites, oldest first
    pub websites: Vec<WebsiteRecord>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code
    pub code: String,
    /// Human-readable error message
    pub message: String,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new("BAD_REQUEST", message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new("NOT_FOUND", message)
    }
}
