//! Router assembly.

use crate::handlers;
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Build the application router with all routes and middleware.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/api/recommendations", post(handlers::recommend))
        .route("/api/titles", get(handlers::titles))
        .route("/api/movies/search", get(handlers::movie_search))
        .route("/api/faq", get(handlers::faq))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
