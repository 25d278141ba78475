//! HTTP API Server Module
//!
//! Exposes the scrape pipeline over HTTP, plus health and read-only listing
//! endpoints for stored websites.

pub mod handlers;
pub mod routes;
pub mod server;
pub mod types;

pub use handlers::AppState;
pub use routes::create_router;
pub use server::HttpServer;
