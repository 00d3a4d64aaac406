//! Error types for catalog and ratings loading.

use thiserror::Error;

/// Errors that can occur while loading the movie catalog or ratings file.
///
/// Any of these is fatal at startup: a store that cannot be fully loaded
/// must not serve requests, and malformed rows are propagated rather than
/// silently dropped.
#[derive(Error, Debug)]
pub enum LoadError {
    /// I/O error occurred while reading a data file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Line in a data file couldn't be parsed
    #[error("Parse error at line {line} in {file}: {reason}")]
    Parse {
        file: String,
        line: usize,
        reason: String,
    },

    /// A data field had an invalid value
    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },

    /// A data file is missing its header row
    #[error("Missing header row in {file}")]
    MissingHeader { file: String },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, LoadError>;
