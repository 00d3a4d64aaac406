//! Shared application state.

use crate::omdb::OmdbClient;
use catalog::RatingsStore;
use predictor::SvdModel;
use recommender::{CollaborativeRecommender, ContentRecommender};
use std::sync::Arc;

/// Everything the handlers need, cheap to clone per request.
///
/// The store and model are loaded once at startup and immutable for the
/// process lifetime; both recommenders share them through `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<RatingsStore>,
    pub collaborative: Arc<CollaborativeRecommender<SvdModel>>,
    pub content: Arc<ContentRecommender>,
    pub omdb: OmdbClient,
}

impl AppState {
    pub fn new(store: Arc<RatingsStore>, model: Arc<SvdModel>, omdb: OmdbClient) -> Self {
        let collaborative = Arc::new(CollaborativeRecommender::new(store.clone(), model));
        let content = Arc::new(ContentRecommender::new(store.clone()));
        Self {
            store,
            collaborative,
            content,
            omdb,
        }
    }
}
