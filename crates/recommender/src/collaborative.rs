//! Collaborative-filtering recommender.
//!
//! Turns three seed titles into a ranked list of recommended titles:
//!
//! 1. Build the utility and user-similarity matrices fresh for this
//!    request (stateless; nothing is cached between calls).
//! 2. Resolve each seed title to a movie id; an unknown title is a
//!    recoverable `TitleNotFound`.
//! 3. For each seed movie, collect the top users by predicted rating
//!    (duplicates across seeds are kept; they reinforce popularity).
//! 4. Per candidate user, either the warm branch (favorite titles of the
//!    user's 20 most-similar peers, tallied) or the cold-start branch
//!    (global popularity) when the user has no similarity column.
//! 5. Tally titles across all per-user lists and return the `top_n` most
//!    frequent. The caller's `top_n` is honored at every stage, including
//!    the final tally.

use crate::error::{RecommendError, Result};
use crate::neighbors::{DEFAULT_NEIGHBOR_K, NeighborFinder};
use crate::popularity::global_top_titles;
use crate::similarity::UserSimilarity;
use crate::Recommend;
use catalog::RatingsStore;
use predictor::RatingPredictor;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Default number of most-similar peers consulted per warm candidate user.
pub const DEFAULT_SIMILAR_K: usize = 20;

/// Collaborative recommender over a shared ratings store and an injected
/// rating predictor.
pub struct CollaborativeRecommender<P> {
    store: Arc<RatingsStore>,
    predictor: Arc<P>,
    neighbor_k: usize,
    similar_k: usize,
}

impl<P: RatingPredictor> CollaborativeRecommender<P> {
    pub fn new(store: Arc<RatingsStore>, predictor: Arc<P>) -> Self {
        Self {
            store,
            predictor,
            neighbor_k: DEFAULT_NEIGHBOR_K,
            similar_k: DEFAULT_SIMILAR_K,
        }
    }

    /// Configure how many top users are kept per seed movie (default: 10)
    pub fn with_neighbor_k(mut self, k: usize) -> Self {
        self.neighbor_k = k;
        self
    }

    /// Configure how many similar peers are consulted per candidate user
    /// (default: 20)
    pub fn with_similar_k(mut self, k: usize) -> Self {
        self.similar_k = k;
        self
    }

    /// Recommend up to `top_n` titles for three seed movies.
    #[instrument(skip(self, seed_titles))]
    pub fn recommend(&self, seed_titles: &[String; 3], top_n: usize) -> Result<Vec<String>> {
        // Derived matrices are request-local: concurrent requests never
        // observe each other's state.
        let similarity = UserSimilarity::build(&self.store);

        let mut seed_ids = Vec::with_capacity(seed_titles.len());
        for title in seed_titles {
            let id = self
                .store
                .movie_id_by_title(title)
                .ok_or_else(|| RecommendError::TitleNotFound(title.clone()))?;
            seed_ids.push(id);
        }

        let finder = NeighborFinder::new(&self.store, &*self.predictor);
        let mut per_user_lists: Vec<Vec<String>> = Vec::new();

        for &seed_id in &seed_ids {
            let candidate_users = finder.top_users_for_movie(seed_id, self.neighbor_k);
            if candidate_users.is_empty() {
                // No users at all to route through; this seed contributes
                // the global popularity list instead of nothing.
                per_user_lists.push(global_top_titles(&self.store, top_n));
                continue;
            }

            for user in candidate_users {
                let recommendations = if similarity.contains(user) {
                    self.warm_recommendations(&similarity, user, top_n)
                } else {
                    debug!(user, "Cold-start candidate, using popularity fallback");
                    global_top_titles(&self.store, top_n)
                };
                per_user_lists.push(recommendations);
            }
        }

        // Tally across all candidate users' lists; the most repeated
        // titles win.
        let result = tally_ranked(per_user_lists.into_iter().flatten(), top_n);
        if result.is_empty() {
            return Err(RecommendError::EmptyResult);
        }

        info!(
            seeds = ?seed_titles,
            returned = result.len(),
            "Collaborative recommendation complete"
        );
        Ok(result)
    }

    /// Warm branch: tally the maximally-rated titles of the user's most
    /// similar peers.
    fn warm_recommendations(
        &self,
        similarity: &UserSimilarity,
        user: catalog::UserId,
        top_n: usize,
    ) -> Vec<String> {
        let peers = similarity.most_similar(user, self.similar_k);
        let favorites = peers
            .into_iter()
            .flat_map(|peer| similarity.max_rated_titles(peer));
        tally_ranked(favorites, top_n)
    }
}

impl<P: RatingPredictor> Recommend for CollaborativeRecommender<P> {
    fn recommend(&self, seed_titles: &[String; 3], top_n: usize) -> Result<Vec<String>> {
        CollaborativeRecommender::recommend(self, seed_titles, top_n)
    }
}

/// Count occurrences and rank by frequency, descending.
///
/// Ties keep first-occurrence order: the tally records the order titles
/// first appear and the descending sort is stable. Output is deduplicated
/// by construction.
fn tally_ranked(items: impl IntoIterator<Item = String>, n: usize) -> Vec<String> {
    let mut order: Vec<String> = Vec::new();
    let mut counts: HashMap<String, u32> = HashMap::new();

    for item in items {
        match counts.get_mut(&item) {
            Some(count) => *count += 1,
            None => {
                counts.insert(item.clone(), 1);
                order.push(item);
            }
        }
    }

    order.sort_by_key(|title| std::cmp::Reverse(counts[title]));
    order.truncate(n);
    order
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tally_ranked_by_frequency() {
        let items = ["b", "a", "b", "c", "b", "a"].map(String::from);
        assert_eq!(tally_ranked(items, 10), vec!["b", "a", "c"]);
    }

    #[test]
    fn test_tally_ties_keep_first_occurrence() {
        let items = ["x", "y", "z"].map(String::from);
        assert_eq!(tally_ranked(items, 10), vec!["x", "y", "z"]);
    }

    #[test]
    fn test_tally_truncates() {
        let items = ["a", "a", "b", "c"].map(String::from);
        assert_eq!(tally_ranked(items, 2), vec!["a", "b"]);
    }

    #[test]
    fn test_tally_empty() {
        assert!(tally_ranked(std::iter::empty(), 5).is_empty());
    }
}
