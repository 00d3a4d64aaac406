//! Global popularity fallback.
//!
//! When a candidate user has no usable similarity column (the cold-start
//! case), recommendations fall back to the globally most popular titles:
//! mean rating per title, descending, with ties broken by the ratings
//! file's natural row order.

use catalog::RatingsStore;
use std::collections::HashMap;

/// The `n` titles with the highest mean rating across all users.
///
/// Titles are tallied in first-appearance order over the ratings file, and
/// the descending sort is stable, so ties resolve to that natural order.
/// Ratings whose movie id is missing from the catalog contribute nothing.
/// Returns an empty list only when the store holds no usable ratings.
pub fn global_top_titles(store: &RatingsStore, n: usize) -> Vec<String> {
    let mut order: Vec<&str> = Vec::new();
    let mut sums: HashMap<&str, (f32, u32)> = HashMap::new();

    for rating in store.all_ratings() {
        let Some(title) = store.title_of(rating.movie_id) else {
            continue;
        };
        let entry = sums.entry(title).or_insert_with(|| {
            order.push(title);
            (0.0, 0)
        });
        entry.0 += rating.rating;
        entry.1 += 1;
    }

    let mut ranked: Vec<(&str, f32)> = order
        .iter()
        .map(|&title| {
            let (sum, count) = sums[title];
            (title, sum / count as f32)
        })
        .collect();
    // Stable sort: equal means keep first-appearance order.
    ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    ranked.truncate(n);
    ranked.into_iter().map(|(title, _)| title.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog::{Movie, Rating};

    fn store() -> RatingsStore {
        let mut store = RatingsStore::new();
        for (id, title) in [(1, "A"), (2, "B"), (3, "C")] {
            store.insert_movie(Movie {
                id,
                title: title.to_string(),
                genres: vec![],
            });
        }
        store
    }

    fn rate(store: &mut RatingsStore, user_id: u32, movie_id: u32, rating: f32) {
        store.insert_rating(Rating {
            user_id,
            movie_id,
            rating,
        });
    }

    #[test]
    fn test_ranked_by_mean_rating() {
        let mut store = store();
        rate(&mut store, 1, 1, 3.0);
        rate(&mut store, 1, 2, 5.0);
        rate(&mut store, 2, 2, 5.0);
        rate(&mut store, 2, 3, 4.0);

        assert_eq!(global_top_titles(&store, 3), vec!["B", "C", "A"]);
    }

    #[test]
    fn test_ties_keep_row_order() {
        let mut store = store();
        // C appears first in the ratings file, then A; both mean 4.0.
        rate(&mut store, 1, 3, 4.0);
        rate(&mut store, 1, 1, 4.0);

        assert_eq!(global_top_titles(&store, 2), vec!["C", "A"]);
    }

    #[test]
    fn test_truncates_to_n() {
        let mut store = store();
        rate(&mut store, 1, 1, 5.0);
        rate(&mut store, 1, 2, 4.0);
        rate(&mut store, 1, 3, 3.0);

        assert_eq!(global_top_titles(&store, 1), vec!["A"]);
    }

    #[test]
    fn test_empty_store_yields_empty() {
        assert!(global_top_titles(&store(), 10).is_empty());
    }

    #[test]
    fn test_unknown_movie_ids_skipped() {
        let mut store = store();
        rate(&mut store, 1, 99, 5.0);
        rate(&mut store, 1, 1, 2.0);

        assert_eq!(global_top_titles(&store, 10), vec!["A"]);
    }
}
