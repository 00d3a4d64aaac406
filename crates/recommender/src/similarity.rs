//! User-similarity matrix construction.
//!
//! Builds the title×user utility matrix from the ratings store and the
//! user×user cosine similarity matrix over its columns:
//!
//! 1. Join rating events with the catalog to attach titles (ratings for
//!    movies missing from the catalog are joined out).
//! 2. Pivot into one row per user, one column per title; duplicate
//!    (user, title) ratings are averaged.
//! 3. Row-normalize per user: `(x - mean(x)) / (max(x) - min(x))`. A user
//!    with zero rating variance would divide by zero, so that row is forced
//!    to all zeros instead of producing NaN.
//! 4. Fill missing cells with 0, transpose so rows are titles and columns
//!    are users, and drop user columns that are entirely zero (no signal).
//! 5. Compute pairwise cosine similarity between the remaining user
//!    columns; zero vectors get similarity 0 rather than an undefined value.
//!
//! The matrix is rebuilt fresh for every recommendation request: expensive,
//! but stateless and always consistent with the store.

use catalog::{RatingsStore, UserId};
use rayon::prelude::*;
use std::collections::HashMap;
use tracing::{debug, instrument};

/// Normalized values closer to zero than this are treated as zero when
/// deciding whether a user column carries any signal.
const SIGNAL_EPSILON: f32 = 1e-9;

/// The utility matrix and user×user cosine similarity derived from it.
///
/// Title axis is sorted lexicographically and user axis ascending by id, so
/// every derived ordering is deterministic.
pub struct UserSimilarity {
    /// Title axis, lexicographically sorted.
    titles: Vec<String>,
    /// Kept users (non-degenerate columns), ascending by id.
    users: Vec<UserId>,
    user_index: HashMap<UserId, usize>,
    /// One normalized column per kept user, `titles.len()` entries each.
    columns: Vec<Vec<f32>>,
    /// Square pairwise cosine similarity, indexed like `users`.
    similarity: Vec<Vec<f32>>,
}

impl UserSimilarity {
    /// Build the utility and similarity matrices from the store.
    #[instrument(skip(store))]
    pub fn build(store: &RatingsStore) -> Self {
        // Step 1 + 2: join to titles and pivot per user. Duplicate cells
        // are averaged, matching a mean-aggregating pivot.
        let mut title_set: Vec<&str> = store
            .all_ratings()
            .iter()
            .filter_map(|r| store.title_of(r.movie_id))
            .collect();
        title_set.sort_unstable();
        title_set.dedup();
        let titles: Vec<String> = title_set.into_iter().map(|t| t.to_string()).collect();
        let title_index: HashMap<&str, usize> = titles
            .iter()
            .enumerate()
            .map(|(i, t)| (t.as_str(), i))
            .collect();

        let mut user_ids: Vec<UserId> = store.users().to_vec();
        user_ids.sort_unstable();

        // Step 3 + 4: normalize each user row, zero-fill, and keep only
        // columns with signal.
        let normalized: Vec<(UserId, Vec<f32>)> = user_ids
            .par_iter()
            .filter_map(|&user| {
                let column = normalize_user_column(store, user, &title_index, titles.len())?;
                Some((user, column))
            })
            .collect();

        let users: Vec<UserId> = normalized.iter().map(|(u, _)| *u).collect();
        let columns: Vec<Vec<f32>> = normalized.into_iter().map(|(_, c)| c).collect();
        let user_index: HashMap<UserId, usize> =
            users.iter().enumerate().map(|(i, &u)| (u, i)).collect();

        // Step 5: pairwise cosine over the kept columns.
        let norms: Vec<f32> = columns
            .iter()
            .map(|c| c.iter().map(|v| v * v).sum::<f32>().sqrt())
            .collect();
        let similarity: Vec<Vec<f32>> = (0..columns.len())
            .into_par_iter()
            .map(|i| {
                (0..columns.len())
                    .map(|j| cosine(&columns[i], &columns[j], norms[i], norms[j]))
                    .collect()
            })
            .collect();

        debug!(
            titles = titles.len(),
            users = users.len(),
            "Built user similarity matrix"
        );

        Self {
            titles,
            users,
            user_index,
            columns,
            similarity,
        }
    }

    /// Whether a user survived matrix construction. Users filtered out here
    /// are the cold-start cases.
    pub fn contains(&self, user: UserId) -> bool {
        self.user_index.contains_key(&user)
    }

    /// The `k` users most similar to `user`, most similar first.
    ///
    /// The user is always their own nearest neighbor at similarity 1.0, so
    /// self is excluded by an explicit filter. Ties break ascending by
    /// user id. Returns an empty list for unknown users.
    pub fn most_similar(&self, user: UserId, k: usize) -> Vec<UserId> {
        let Some(&idx) = self.user_index.get(&user) else {
            return Vec::new();
        };

        let mut scored: Vec<(UserId, f32)> = self.similarity[idx]
            .iter()
            .enumerate()
            .filter(|&(j, _)| j != idx)
            .map(|(j, &sim)| (self.users[j], sim))
            .collect();
        scored.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.0.cmp(&b.0))
        });
        scored.truncate(k);
        scored.into_iter().map(|(u, _)| u).collect()
    }

    /// Titles the user rated at their personal maximum (normalized).
    ///
    /// Ties are all included, in lexicographic title order. Empty for
    /// unknown users.
    pub fn max_rated_titles(&self, user: UserId) -> Vec<String> {
        let Some(&idx) = self.user_index.get(&user) else {
            return Vec::new();
        };
        let column = &self.columns[idx];

        let max = column.iter().cloned().fold(f32::MIN, f32::max);
        column
            .iter()
            .enumerate()
            .filter(|&(_, &v)| (v - max).abs() <= SIGNAL_EPSILON)
            .map(|(i, _)| self.titles[i].clone())
            .collect()
    }

    /// Cosine similarity between two kept users, if both are present.
    pub fn similarity_between(&self, a: UserId, b: UserId) -> Option<f32> {
        let &i = self.user_index.get(&a)?;
        let &j = self.user_index.get(&b)?;
        Some(self.similarity[i][j])
    }

    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    pub fn title_count(&self) -> usize {
        self.titles.len()
    }
}

/// Build one user's normalized utility column, or None if the user carries
/// no usable signal (no catalog-joined ratings, or zero rating variance).
fn normalize_user_column(
    store: &RatingsStore,
    user: UserId,
    title_index: &HashMap<&str, usize>,
    title_count: usize,
) -> Option<Vec<f32>> {
    // Average duplicate (user, title) cells.
    let mut cells: HashMap<usize, (f32, u32)> = HashMap::new();
    for rating in store.ratings_of(user) {
        let Some(title) = store.title_of(rating.movie_id) else {
            continue;
        };
        let idx = title_index[title];
        let entry = cells.entry(idx).or_insert((0.0, 0));
        entry.0 += rating.rating;
        entry.1 += 1;
    }
    if cells.is_empty() {
        return None;
    }

    let values: Vec<(usize, f32)> = cells
        .into_iter()
        .map(|(idx, (sum, count))| (idx, sum / count as f32))
        .collect();

    let mean = values.iter().map(|(_, v)| v).sum::<f32>() / values.len() as f32;
    let max = values.iter().map(|(_, v)| *v).fold(f32::MIN, f32::max);
    let min = values.iter().map(|(_, v)| *v).fold(f32::MAX, f32::min);
    let range = max - min;

    // Zero variance would divide by zero; the whole row collapses to zero
    // and the user is dropped as signal-free.
    if range.abs() <= SIGNAL_EPSILON {
        return None;
    }

    let mut column = vec![0.0; title_count];
    for (idx, value) in values {
        column[idx] = (value - mean) / range;
    }
    if column.iter().all(|v| v.abs() <= SIGNAL_EPSILON) {
        return None;
    }
    Some(column)
}

/// Cosine similarity with an explicit zero-vector policy: similarity of a
/// degenerate (zero) vector with anything is 0, never NaN.
fn cosine(a: &[f32], b: &[f32], norm_a: f32, norm_b: f32) -> f32 {
    if norm_a <= SIGNAL_EPSILON || norm_b <= SIGNAL_EPSILON {
        return 0.0;
    }
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    dot / (norm_a * norm_b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog::{Movie, Rating};

    fn store_with(ratings: &[(UserId, u32, f32)], movies: &[(u32, &str)]) -> RatingsStore {
        let mut store = RatingsStore::new();
        for &(id, title) in movies {
            store.insert_movie(Movie {
                id,
                title: title.to_string(),
                genres: vec![],
            });
        }
        for &(user_id, movie_id, rating) in ratings {
            store.insert_rating(Rating {
                user_id,
                movie_id,
                rating,
            });
        }
        store
    }

    fn three_user_store() -> RatingsStore {
        // Users 1 and 2 agree (like A, dislike B); user 3 is opposite.
        store_with(
            &[
                (1, 1, 5.0),
                (1, 2, 1.0),
                (2, 1, 5.0),
                (2, 2, 1.0),
                (3, 1, 1.0),
                (3, 2, 5.0),
            ],
            &[(1, "A"), (2, "B")],
        )
    }

    #[test]
    fn test_self_similarity_is_one() {
        let sim = UserSimilarity::build(&three_user_store());
        let self_sim = sim.similarity_between(1, 1).unwrap();
        assert!((self_sim - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_self_excluded_from_most_similar() {
        let sim = UserSimilarity::build(&three_user_store());
        let neighbors = sim.most_similar(1, 10);
        assert!(!neighbors.contains(&1));
        // Agreeing user ranks above the opposite one.
        assert_eq!(neighbors, vec![2, 3]);
    }

    #[test]
    fn test_opposite_users_negative_similarity() {
        let sim = UserSimilarity::build(&three_user_store());
        let s = sim.similarity_between(1, 3).unwrap();
        assert!(s < 0.0);
    }

    #[test]
    fn test_zero_variance_user_dropped_without_nan() {
        // User 4 rates everything 3.0: zero variance, must be dropped, and
        // nothing anywhere may be NaN.
        let mut store = three_user_store();
        store.insert_rating(Rating {
            user_id: 4,
            movie_id: 1,
            rating: 3.0,
        });
        store.insert_rating(Rating {
            user_id: 4,
            movie_id: 2,
            rating: 3.0,
        });

        let sim = UserSimilarity::build(&store);
        assert!(!sim.contains(4));
        for u in [1, 2, 3] {
            for v in [1, 2, 3] {
                assert!(sim.similarity_between(u, v).unwrap().is_finite());
            }
        }
    }

    #[test]
    fn test_single_rating_user_is_cold_start() {
        // One rating means max == min, so the row is degenerate.
        let mut store = three_user_store();
        store.insert_rating(Rating {
            user_id: 5,
            movie_id: 1,
            rating: 5.0,
        });

        let sim = UserSimilarity::build(&store);
        assert!(!sim.contains(5));
    }

    #[test]
    fn test_max_rated_titles_includes_ties() {
        // User 6 maximally rates both A and C.
        let store = store_with(
            &[(6, 1, 5.0), (6, 2, 1.0), (6, 3, 5.0)],
            &[(1, "A"), (2, "B"), (3, "C")],
        );
        let sim = UserSimilarity::build(&store);
        assert_eq!(sim.max_rated_titles(6), vec!["A".to_string(), "C".to_string()]);
    }

    #[test]
    fn test_unrated_movies_joined_out() {
        let store = store_with(
            &[(1, 1, 5.0), (1, 2, 1.0)],
            &[(1, "A"), (2, "B"), (3, "Never Rated")],
        );
        let sim = UserSimilarity::build(&store);
        assert_eq!(sim.title_count(), 2);
    }

    #[test]
    fn test_rating_for_unknown_movie_ignored() {
        let store = store_with(&[(1, 1, 5.0), (1, 99, 1.0), (1, 2, 2.0)], &[(1, "A"), (2, "B")]);
        let sim = UserSimilarity::build(&store);
        // Movie 99 is not in the catalog; the join drops it but the user
        // still has variance over A and B.
        assert!(sim.contains(1));
        assert_eq!(sim.title_count(), 2);
    }
}
