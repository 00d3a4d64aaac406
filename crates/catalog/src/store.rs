//! The in-memory ratings store.
//!
//! `RatingsStore` owns everything loaded from the flat files and is
//! immutable after `load_from_files` returns, so it can be shared across
//! threads behind an `Arc` without locking. Row order of the ratings file
//! is preserved: it is the "natural order" used as the deterministic
//! tie-break for popularity rankings.

use crate::error::Result;
use crate::parser;
use crate::types::*;
use std::collections::HashMap;
use std::path::Path;
use tracing::info;

/// Read-only store for the movie catalog and all rating events.
#[derive(Debug, Default)]
pub struct RatingsStore {
    movies: HashMap<MovieId, Movie>,
    /// Title -> id lookup; on duplicate titles the first catalog row wins.
    title_index: HashMap<String, MovieId>,
    /// Catalog titles in file order, for the UI's select-box ranges.
    titles: Vec<String>,
    /// Movie ids in catalog-file order.
    movie_order: Vec<MovieId>,
    /// All rating events in file order.
    ratings: Vec<Rating>,
    /// Per-user rating events, in file order within each user.
    user_ratings: HashMap<UserId, Vec<Rating>>,
    /// Per-movie rating events, in file order within each movie.
    movie_ratings: HashMap<MovieId, Vec<Rating>>,
    /// Distinct user ids in first-encounter order.
    users: Vec<UserId>,
}

impl RatingsStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the catalog and ratings files from a directory.
    ///
    /// Expects `movies.csv` and `ratings.csv` under `data_dir`. The two
    /// files are parsed in parallel; any parse failure aborts the load.
    pub fn load_from_files(data_dir: &Path) -> Result<Self> {
        info!("Loading movie catalog and ratings from {:?}", data_dir);

        let movies_path = data_dir.join("movies.csv");
        let ratings_path = data_dir.join("ratings.csv");

        let (movies, ratings) = rayon::join(
            || parser::parse_movies(&movies_path),
            || parser::parse_ratings(&ratings_path),
        );
        let movies = movies?;
        let ratings = ratings?;

        info!(
            "Loaded {} movies and {} ratings",
            movies.len(),
            ratings.len()
        );

        let mut store = RatingsStore::new();
        for movie in movies {
            store.insert_movie(movie);
        }
        for rating in ratings {
            store.insert_rating(rating);
        }
        Ok(store)
    }

    /// Insert a movie into the catalog. Used by the loader and by tests
    /// building fixture stores.
    pub fn insert_movie(&mut self, movie: Movie) {
        // First occurrence of a title wins the title lookup.
        self.title_index
            .entry(movie.title.clone())
            .or_insert(movie.id);
        self.titles.push(movie.title.clone());
        self.movie_order.push(movie.id);
        self.movies.insert(movie.id, movie);
    }

    /// Append a rating event and update the per-user and per-movie indices.
    pub fn insert_rating(&mut self, rating: Rating) {
        if !self.user_ratings.contains_key(&rating.user_id) {
            self.users.push(rating.user_id);
        }
        self.user_ratings
            .entry(rating.user_id)
            .or_default()
            .push(rating);
        self.movie_ratings
            .entry(rating.movie_id)
            .or_default()
            .push(rating);
        self.ratings.push(rating);
    }

    /// All rating events, in ratings-file row order.
    pub fn all_ratings(&self) -> &[Rating] {
        &self.ratings
    }

    /// Look up a catalog entry by id.
    pub fn movie(&self, id: MovieId) -> Option<&Movie> {
        self.movies.get(&id)
    }

    /// Title of a movie, if it is in the catalog.
    pub fn title_of(&self, id: MovieId) -> Option<&str> {
        self.movies.get(&id).map(|m| m.title.as_str())
    }

    /// Resolve a title to its movie id (first catalog occurrence).
    pub fn movie_id_by_title(&self, title: &str) -> Option<MovieId> {
        self.title_index.get(title).copied()
    }

    /// Iterate over all catalog entries, in catalog-file order.
    pub fn movies(&self) -> impl Iterator<Item = &Movie> {
        self.movie_order.iter().filter_map(|id| self.movies.get(id))
    }

    /// Distinct users known to the store, in first-encounter order.
    pub fn users(&self) -> &[UserId] {
        &self.users
    }

    /// Catalog titles in catalog-file order.
    pub fn titles(&self) -> &[String] {
        &self.titles
    }

    /// All ratings made by one user; empty slice if the user is unknown.
    pub fn ratings_of(&self, user_id: UserId) -> &[Rating] {
        self.user_ratings
            .get(&user_id)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// All ratings received by one movie; empty slice if never rated.
    pub fn ratings_for_movie(&self, movie_id: MovieId) -> &[Rating] {
        self.movie_ratings
            .get(&movie_id)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Mean rating of a movie, or None if it was never rated.
    pub fn mean_rating(&self, movie_id: MovieId) -> Option<f32> {
        let ratings = self.ratings_for_movie(movie_id);
        if ratings.is_empty() {
            return None;
        }
        let total: f32 = ratings.iter().map(|r| r.rating).sum();
        Some(total / ratings.len() as f32)
    }

    /// (movies, users, ratings) counts for logging and validation.
    pub fn counts(&self) -> (usize, usize, usize) {
        (self.movies.len(), self.users.len(), self.ratings.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(id: MovieId, title: &str) -> Movie {
        Movie {
            id,
            title: title.to_string(),
            genres: vec!["Drama".to_string()],
        }
    }

    fn rating(user_id: UserId, movie_id: MovieId, rating: f32) -> Rating {
        Rating {
            user_id,
            movie_id,
            rating,
        }
    }

    #[test]
    fn test_empty_store() {
        let store = RatingsStore::new();
        assert_eq!(store.counts(), (0, 0, 0));
        assert!(store.movie(1).is_none());
        assert!(store.ratings_of(1).is_empty());
        assert!(store.mean_rating(1).is_none());
    }

    #[test]
    fn test_title_lookup_first_occurrence_wins() {
        let mut store = RatingsStore::new();
        store.insert_movie(movie(1, "Solaris (1972)"));
        store.insert_movie(movie(2, "Solaris (1972)"));

        assert_eq!(store.movie_id_by_title("Solaris (1972)"), Some(1));
        // Both rows still appear in the title list.
        assert_eq!(store.titles().len(), 2);
    }

    #[test]
    fn test_users_in_first_encounter_order() {
        let mut store = RatingsStore::new();
        store.insert_rating(rating(7, 1, 4.0));
        store.insert_rating(rating(3, 1, 3.0));
        store.insert_rating(rating(7, 2, 5.0));

        assert_eq!(store.users(), &[7, 3]);
        assert_eq!(store.ratings_of(7).len(), 2);
    }

    #[test]
    fn test_ratings_preserve_row_order() {
        let mut store = RatingsStore::new();
        store.insert_rating(rating(1, 10, 2.0));
        store.insert_rating(rating(2, 20, 5.0));
        store.insert_rating(rating(1, 20, 3.0));

        let movie_ids: Vec<MovieId> = store.all_ratings().iter().map(|r| r.movie_id).collect();
        assert_eq!(movie_ids, vec![10, 20, 20]);
    }

    #[test]
    fn test_mean_rating() {
        let mut store = RatingsStore::new();
        store.insert_rating(rating(1, 5, 4.0));
        store.insert_rating(rating(2, 5, 2.0));

        let mean = store.mean_rating(5).unwrap();
        assert!((mean - 3.0).abs() < f32::EPSILON);
    }
}
