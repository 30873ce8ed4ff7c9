//! Error types for the catalogue crate.

use thiserror::Error;

/// Errors raised while loading data or querying the repository.
#[derive(Error, Debug)]
pub enum CatalogueError {
    /// I/O error while reading a data file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The CSV layer rejected the input
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A row in the data file couldn't be parsed
    ///
    /// This variant stores context about where the error occurred
    #[error("Parse error at line {line} in {file}: {reason}")]
    ParseError {
        file: String,
        line: usize,
        reason: String,
    },

    /// `movie_index` was queried for a movie the repository does not hold
    #[error("no movie titled {title:?} with release year {release_year:?}")]
    MovieNotFound {
        title: String,
        release_year: Option<u16>,
    },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, CatalogueError>;
