//! Request handlers for the HTTP API.

use crate::error::{AppError, AppResult};
use crate::faq::{FAQ, FaqEntry};
use crate::omdb::MovieMetadata;
use crate::state::AppState;
use axum::{
    Json,
    extract::{Query, State},
};
use recommender::Recommend;
use serde::{Deserialize, Serialize};
use tracing::info;

fn default_top_n() -> usize {
    10
}

/// Which recommendation algorithm to run, mirroring the UI's radio choice.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    #[default]
    Collaborative,
    Content,
}

#[derive(Debug, Deserialize)]
pub struct RecommendRequest {
    /// Exactly three favorite movies, by catalog title.
    pub seeds: [String; 3],
    #[serde(default = "default_top_n")]
    pub top_n: usize,
    #[serde(default)]
    pub strategy: Strategy,
}

#[derive(Debug, Serialize)]
pub struct RecommendResponse {
    pub recommendations: Vec<String>,
}

/// POST /api/recommendations
pub async fn recommend(
    State(state): State<AppState>,
    Json(request): Json<RecommendRequest>,
) -> AppResult<Json<RecommendResponse>> {
    if request.top_n == 0 {
        return Err(AppError::InvalidInput("top_n must be at least 1".to_string()));
    }

    info!(strategy = ?request.strategy, top_n = request.top_n, "Recommendation request");

    // Matrix construction is CPU-bound; keep it off the async workers.
    let recommendations = tokio::task::spawn_blocking(move || {
        let strategy: &dyn Recommend = match request.strategy {
            Strategy::Collaborative => state.collaborative.as_ref(),
            Strategy::Content => state.content.as_ref(),
        };
        strategy.recommend(&request.seeds, request.top_n)
    })
    .await
    .map_err(|e| AppError::Internal(format!("Recommendation task panicked: {}", e)))??;

    Ok(Json(RecommendResponse { recommendations }))
}

#[derive(Debug, Deserialize)]
pub struct TitlesQuery {
    #[serde(default)]
    pub offset: usize,
    #[serde(default = "default_titles_limit")]
    pub limit: usize,
}

fn default_titles_limit() -> usize {
    500
}

#[derive(Debug, Serialize)]
pub struct TitlesResponse {
    pub titles: Vec<String>,
    pub total: usize,
}

/// GET /api/titles: catalog titles for the UI's seed select boxes.
pub async fn titles(
    State(state): State<AppState>,
    Query(query): Query<TitlesQuery>,
) -> Json<TitlesResponse> {
    let all = state.store.titles();
    let start = query.offset.min(all.len());
    let end = start.saturating_add(query.limit).min(all.len());

    Json(TitlesResponse {
        titles: all[start..end].to_vec(),
        total: all.len(),
    })
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub title: String,
}

/// GET /api/movies/search: passthrough to the metadata API.
pub async fn movie_search(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> AppResult<Json<MovieMetadata>> {
    if query.title.trim().is_empty() {
        return Err(AppError::InvalidInput("title must not be empty".to_string()));
    }
    let metadata = state.omdb.lookup(&query.title).await?;
    Ok(Json(metadata))
}

/// GET /api/faq
pub async fn faq() -> Json<&'static [FaqEntry]> {
    Json(FAQ)
}

/// GET /health
pub async fn health() -> &'static str {
    "OK"
}
