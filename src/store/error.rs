//! Errors raised while reading Bear's store.

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::InvalidDateFormat;

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The default database path does not exist and no override was given.
    #[error(
        "database error: Bear database not found at {path}. Please ensure Bear is installed and has been opened at least once"
    )]
    StoreNotFound { path: PathBuf },

    /// The database exists (or was named explicitly) but could not be opened.
    #[error("database error: failed to open Bear database at {path}: {source}")]
    StoreOpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// A result row is missing a required field or holds an invalid value.
    #[error("database error: malformed row: {0}")]
    MalformedRow(String),

    /// A search was requested without any filter.
    #[error(
        "search error: please provide a search term, a tag, a date filter or the pinned flag to search for notes"
    )]
    MissingSearchCriteria,

    /// A note identifier was empty or whitespace-only.
    #[error("invalid note identifier: identifier cannot be empty")]
    InvalidIdentifier,

    /// A date filter phrase could not be parsed.
    #[error("search error: {0}")]
    InvalidDate(#[from] InvalidDateFormat),

    /// A query failed.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
