//! HTTP API Route Definitions

use axum::{routing::get, Router};

use super::handlers::{self, AppState};

/// Create the API router with all routes
pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        // The scrape endpoint takes its `url` from the body on GET as well
        .route("/api/web/scrap", get(handlers::scrap).post(handlers::scrap))
        .route("/api/web/sites", get(handlers::list_sites))
        .route("/api/web/sites/:hostname", get(handlers::get_site))
        .with_state(app_state)
}
