//! Neighbor finder: map a seed movie to the users who most prefer it.
//!
//! For every user known to the ratings store, ask the rating predictor how
//! that user would rate the seed movie, then keep the k highest estimates.
//! This costs O(|users|) predictor calls per seed movie, so the sweep runs
//! in parallel. Duplicate users across different seed movies are allowed
//! downstream; repetition is how popularity reinforces itself.

use catalog::{MovieId, RatingsStore, UserId};
use predictor::RatingPredictor;
use rayon::prelude::*;
use tracing::debug;

/// Default number of top users kept per seed movie.
pub const DEFAULT_NEIGHBOR_K: usize = 10;

/// Finds the users who most strongly prefer a given movie.
pub struct NeighborFinder<'a, P: RatingPredictor> {
    store: &'a RatingsStore,
    predictor: &'a P,
}

impl<'a, P: RatingPredictor> NeighborFinder<'a, P> {
    pub fn new(store: &'a RatingsStore, predictor: &'a P) -> Self {
        Self { store, predictor }
    }

    /// The `k` users with the highest estimated rating for `movie_id`,
    /// highest first.
    ///
    /// Ties break ascending by user id, an explicit deterministic ordering
    /// rather than whatever the sort happens to preserve.
    pub fn top_users_for_movie(&self, movie_id: MovieId, k: usize) -> Vec<UserId> {
        let mut scored: Vec<(UserId, f32)> = self
            .store
            .users()
            .par_iter()
            .map(|&user| (user, self.predictor.predict(user, movie_id).estimate))
            .collect();

        scored.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.0.cmp(&b.0))
        });
        scored.truncate(k);

        debug!(
            movie_id,
            k,
            found = scored.len(),
            "Selected top users for seed movie"
        );
        scored.into_iter().map(|(user, _)| user).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog::Rating;
    use predictor::Prediction;

    /// Predictor stub: estimate = user id scaled, so ordering is knowable.
    struct ByUserId;

    impl RatingPredictor for ByUserId {
        fn predict(&self, user: UserId, _movie: MovieId) -> Prediction {
            Prediction {
                estimate: user as f32 / 10.0,
                fallback: false,
            }
        }
    }

    /// Predictor stub: same estimate for everyone.
    struct Constant;

    impl RatingPredictor for Constant {
        fn predict(&self, _user: UserId, _movie: MovieId) -> Prediction {
            Prediction {
                estimate: 3.0,
                fallback: true,
            }
        }
    }

    fn store_with_users(users: &[UserId]) -> RatingsStore {
        let mut store = RatingsStore::new();
        for &user_id in users {
            store.insert_rating(Rating {
                user_id,
                movie_id: 1,
                rating: 4.0,
            });
        }
        store
    }

    #[test]
    fn test_top_users_sorted_by_estimate() {
        let store = store_with_users(&[3, 1, 7, 5]);
        let finder = NeighborFinder::new(&store, &ByUserId);

        assert_eq!(finder.top_users_for_movie(1, 3), vec![7, 5, 3]);
    }

    #[test]
    fn test_ties_break_by_user_id() {
        let store = store_with_users(&[9, 2, 6]);
        let finder = NeighborFinder::new(&store, &Constant);

        // All estimates equal: deterministic ascending id order.
        assert_eq!(finder.top_users_for_movie(1, 2), vec![2, 6]);
    }

    #[test]
    fn test_k_larger_than_user_count() {
        let store = store_with_users(&[1, 2]);
        let finder = NeighborFinder::new(&store, &ByUserId);

        assert_eq!(finder.top_users_for_movie(1, 10).len(), 2);
    }

    #[test]
    fn test_empty_store_yields_no_users() {
        let store = RatingsStore::new();
        let finder = NeighborFinder::new(&store, &ByUserId);

        assert!(finder.top_users_for_movie(1, 10).is_empty());
    }
}
