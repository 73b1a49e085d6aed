//! Router configuration for the web server.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;

use super::handlers;
use super::AppState;

/// Create the main router with all routes.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Pages
        .route("/", get(handlers::home))
        .route("/days/:day", get(handlers::day_page))
        // Query API
        .route("/api/health", get(handlers::health))
        .route("/api/days", get(handlers::api_days))
        .route("/api/days/:day", get(handlers::api_day))
        .route("/api/days/:day/entries/:id", get(handlers::api_entry))
        .route("/api/search", get(handlers::api_search))
        .route("/api/reload", post(handlers::api_reload))
        // Static assets (CSS/JS)
        .route("/static/style.css", get(handlers::serve_css))
        .route("/static/schedule.js", get(handlers::serve_js))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
