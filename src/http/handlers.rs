//! HTTP API Request Handlers
//!
//! Handlers that map HTTP requests to scrape pipeline operations. Every
//! pipeline error is translated into a response here.

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;
use tracing::{debug, error};

use super::types::*;
use crate::pipeline::{ScrapeError, ScrapePipeline, CONFLICT_MESSAGE};
use crate::scraping::normalize_hostname;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<ScrapePipeline>,
}

impl AppState {
    pub fn new(pipeline: Arc<ScrapePipeline>) -> Self {
        Self { pipeline }
    }
}

impl IntoResponse for ScrapeError {
    fn into_response(self) -> Response {
        match self {
            ScrapeError::BadRequest(message) => {
                (StatusCode::BAD_REQUEST, Json(ErrorResponse::bad_request(message))).into_response()
            }
            ScrapeError::InvalidUrl(e) => (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::new("INVALID_URL", e.to_string())),
            )
                .into_response(),
            ScrapeError::Conflict { hostname } => {
                debug!("Rejecting duplicate website {}", hostname);
                (StatusCode::BAD_REQUEST, CONFLICT_MESSAGE).into_response()
            }
            ScrapeError::Fetch(e) => (
                StatusCode::BAD_GATEWAY,
                Json(ErrorResponse::new("FETCH_FAILED", e.to_string())),
            )
                .into_response(),
            ScrapeError::Store(e) => {
                error!("Website store failed: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse::new("STORE_ERROR", e.to_string())),
                )
                    .into_response()
            }
        }
    }
}

/// Health check endpoint
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Scrape endpoint: fetch the page, store its metadata, answer with the raw HTML
pub async fn scrap(
    State(state): State<AppState>,
    request: ScrapRequest,
) -> Result<Response, ScrapeError> {
    debug!("HTTP scrap request: url={:?}", request.url);

    let outcome = state.pipeline.run(request.url.as_deref()).await?;

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
        outcome.html,
    )
        .into_response())
}

/// List every stored website
pub async fn list_sites(State(state): State<AppState>) -> Result<Json<SitesResponse>, ScrapeError> {
    let websites = state.pipeline.gateway().store().list().await?;

    Ok(Json(SitesResponse {
        total: websites.len(),
        websites,
    }))
}

/// Look up one stored website by hostname (canonicalized before lookup)
pub async fn get_site(
    State(state): State<AppState>,
    Path(hostname): Path<String>,
) -> Result<Response, ScrapeError> {
    let hostname = normalize_hostname(&hostname);

    match state
        .pipeline
        .gateway()
        .store()
        .find_by_hostname(&hostname)
        .await?
    {
        Some(record) => Ok((StatusCode::OK, Json(record)).into_response()),
        None => Ok((
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::not_found(format!(
                "No website recorded for '{}'",
                hostname
            ))),
        )
            .into_response()),
    }
}
