//! Error types for the recommendation core.

use thiserror::Error;

/// Per-request recommendation failures.
///
/// These are recoverable: the caller reports "no recommendation available"
/// and keeps serving. Fatal conditions (missing data files, missing model
/// artifact) are surfaced at startup by the catalog and predictor crates
/// instead.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum RecommendError {
    /// A seed title is not present in the catalog
    #[error("Movie title not found in catalog: {0}")]
    TitleNotFound(String),

    /// Not even the popularity fallback could produce a title
    #[error("No recommendations could be produced from the available ratings")]
    EmptyResult,
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, RecommendError>;
