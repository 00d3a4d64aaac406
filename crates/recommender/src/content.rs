//! Content-based recommender.
//!
//! The sibling of the collaborative recommender with the same contract:
//! three seed titles in, a ranked title list out. Scoring is Jaccard genre
//! overlap between each catalog movie and the three seeds, with the movie's
//! mean rating as a secondary ordering and lexicographic title order as the
//! final deterministic tie-break. There is no cold-start branch: metadata
//! is always available.

use crate::Recommend;
use crate::error::{RecommendError, Result};
use catalog::{Movie, RatingsStore};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{info, instrument};

/// Content-based recommender over a shared ratings store.
pub struct ContentRecommender {
    store: Arc<RatingsStore>,
}

impl ContentRecommender {
    pub fn new(store: Arc<RatingsStore>) -> Self {
        Self { store }
    }

    /// Recommend up to `top_n` titles by metadata similarity to the seeds.
    #[instrument(skip(self, seed_titles))]
    pub fn recommend(&self, seed_titles: &[String; 3], top_n: usize) -> Result<Vec<String>> {
        let mut seeds: Vec<&Movie> = Vec::with_capacity(seed_titles.len());
        for title in seed_titles {
            let movie = self
                .store
                .movie_id_by_title(title)
                .and_then(|id| self.store.movie(id))
                .ok_or_else(|| RecommendError::TitleNotFound(title.clone()))?;
            seeds.push(movie);
        }
        let seed_ids: HashSet<_> = seeds.iter().map(|m| m.id).collect();

        let mut scored: Vec<(&str, f32, f32)> = self
            .store
            .movies()
            .filter(|movie| !seed_ids.contains(&movie.id))
            .map(|movie| {
                let overlap: f32 = seeds
                    .iter()
                    .map(|seed| genre_jaccard(&seed.genres, &movie.genres))
                    .sum();
                let mean = self.store.mean_rating(movie.id).unwrap_or(0.0);
                (movie.title.as_str(), overlap, mean)
            })
            .collect();

        scored.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| b.2.partial_cmp(&a.2).unwrap_or(std::cmp::Ordering::Equal))
                .then_with(|| a.0.cmp(b.0))
        });
        scored.truncate(top_n);

        let result: Vec<String> = scored.into_iter().map(|(t, _, _)| t.to_string()).collect();
        if result.is_empty() {
            return Err(RecommendError::EmptyResult);
        }

        info!(seeds = ?seed_titles, returned = result.len(), "Content recommendation complete");
        Ok(result)
    }
}

impl Recommend for ContentRecommender {
    fn recommend(&self, seed_titles: &[String; 3], top_n: usize) -> Result<Vec<String>> {
        ContentRecommender::recommend(self, seed_titles, top_n)
    }
}

/// Jaccard similarity over two genre label sets; 0 when either is empty.
fn genre_jaccard(a: &[String], b: &[String]) -> f32 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let set_a: HashSet<&str> = a.iter().map(|g| g.as_str()).collect();
    let set_b: HashSet<&str> = b.iter().map(|g| g.as_str()).collect();
    let intersection = set_a.intersection(&set_b).count();
    let union = set_a.union(&set_b).count();
    intersection as f32 / union as f32
}
