//! # Recommender Crate
//!
//! The recommendation core: turns three seed movie titles into a ranked
//! list of recommended titles.
//!
//! ## Components
//!
//! ### Collaborative filtering (the interesting part)
//! Combines a pre-trained rating predictor with an on-the-fly
//! user-similarity computation:
//! - **similarity**: title×user utility matrix + user×user cosine matrix
//! - **neighbors**: seed movie → users who most prefer it (predictor sweep)
//! - **popularity**: global mean-rating fallback for cold-start users
//! - **collaborative**: orchestration, tallying, cold-start handling
//!
//! ### Content-based filtering
//! - **content**: pure genre-overlap scoring with the same contract and
//!   no cold-start branch
//!
//! ## Example Usage
//!
//! ```ignore
//! use recommender::{CollaborativeRecommender, Recommend};
//!
//! let recommender = CollaborativeRecommender::new(store, model);
//! let seeds = [movie_a, movie_b, movie_c];
//! let titles = recommender.recommend(&seeds, 10)?;
//! ```
//!
//! Every call recomputes the derived matrices: the core is a pure,
//! stateless request/response computation over the read-only store, so
//! concurrent requests need no locking.

// Public modules
pub mod collaborative;
pub mod content;
pub mod error;
pub mod neighbors;
pub mod popularity;
pub mod similarity;

// Re-export commonly used types
pub use collaborative::CollaborativeRecommender;
pub use content::ContentRecommender;
pub use error::{RecommendError, Result};
pub use neighbors::NeighborFinder;
pub use popularity::global_top_titles;
pub use similarity::UserSimilarity;

/// A recommendation strategy: three seed titles in, ranked titles out.
///
/// Both recommenders implement this so the serving shell can pick a
/// strategy at the request boundary.
pub trait Recommend: Send + Sync {
    fn recommend(&self, seed_titles: &[String; 3], top_n: usize) -> Result<Vec<String>>;
}
