//! Core domain types for the movie catalog and ratings data.

use serde::{Deserialize, Serialize};

/// Unique identifier for a user in the ratings file
pub type UserId = u32;

/// Unique identifier for a movie in the catalog
pub type MovieId = u32;

/// A single rating event: one user's rating of one movie.
///
/// The ratings file also carries a timestamp column, but it is dropped at
/// parse time; nothing downstream uses it. Uniqueness of (user, movie)
/// pairs is not enforced.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Rating {
    pub user_id: UserId,
    pub movie_id: MovieId,
    /// Rating value on a 0.0 to 5.0 scale
    pub rating: f32,
}

/// A catalog entry for a single movie.
///
/// `title` doubles as the externally visible key: recommendation requests
/// and results are expressed in titles, not ids. Titles are assumed unique
/// for lookup purposes but this is not validated; see
/// [`RatingsStore::movie_id_by_title`](crate::RatingsStore::movie_id_by_title)
/// for how duplicates resolve.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Movie {
    pub id: MovieId,
    pub title: String,
    /// Pipe-separated genre labels from the catalog file. Empty when the
    /// file says "(no genres listed)".
    pub genres: Vec<String>,
}
