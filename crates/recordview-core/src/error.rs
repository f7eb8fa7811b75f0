//! Core error types.

use thiserror::Error;

/// Errors raised while fetching or decoding the record collection.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The byte source was unreachable, timed out, or the object does not exist.
    #[error("fetch error: {0}")]
    Fetch(#[from] object_store::Error),

    /// The fetched bytes are not a valid record document.
    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// A record carried a timestamp that cannot be interpreted.
    #[error("invalid timestamp {value:?} on record {id}")]
    InvalidTimestamp {
        /// Id of the offending record.
        id: i64,
        /// Raw timestamp as found in the source.
        value: String,
    },

    /// The source configuration is unusable.
    #[error("invalid source configuration: {0}")]
    Config(String),
}

/// Errors raised while parsing query parameters, before the pipeline runs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidQueryError {
    /// Unknown record status.
    #[error("invalid status: {0}")]
    InvalidStatus(String),

    /// Unknown sort field.
    #[error("invalid sort field: {0}")]
    InvalidSortField(String),

    /// Unknown sort order.
    #[error("invalid sort order: {0}")]
    InvalidSortOrder(String),

    /// A numeric parameter is not an integer.
    #[error("{param} must be an integer, got {value:?}")]
    InvalidNumber {
        /// Parameter name.
        param: &'static str,
        /// Raw value.
        value: String,
    },

    /// A numeric parameter is outside its allowed range.
    #[error("{param} must be between {min} and {max}, got {value}")]
    OutOfRange {
        /// Parameter name.
        param: &'static str,
        /// Offending value.
        value: i64,
        /// Inclusive lower bound.
        min: i64,
        /// Inclusive upper bound.
        max: i64,
    },
}
