//! # Catalog Crate
//!
//! Loads and indexes the movie catalog and ratings data.
//!
//! ## Main Components
//!
//! - **types**: Core domain types (Movie, Rating, id aliases)
//! - **parser**: Parse the comma-delimited catalog and ratings files
//! - **store**: `RatingsStore`, the immutable in-memory index
//! - **error**: Error types for data loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use catalog::RatingsStore;
//! use std::path::Path;
//!
//! let store = RatingsStore::load_from_files(Path::new("resources/data"))?;
//!
//! let movie_id = store.movie_id_by_title("Toy Story (1995)").unwrap();
//! println!("{} ratings loaded", store.all_ratings().len());
//! ```

// Public modules
pub mod error;
pub mod parser;
pub mod store;
pub mod types;

// Re-export commonly used types for convenience
pub use error::{LoadError, Result};
pub use store::RatingsStore;
pub use types::{Movie, MovieId, Rating, UserId};
