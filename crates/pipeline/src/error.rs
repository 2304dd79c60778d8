//! Errors raised for bad query input.
//!
//! Every variant describes a client mistake. None of them touch the
//! shared catalog, so a failed query has no effect on other requests.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum InvalidQueryError {
    #[error("unrecognized query option '{key}'")]
    UnknownOption { key: String },

    #[error("query option '{key}' given more than once")]
    DuplicateOption { key: String },

    #[error("query option '{key}' has an empty value")]
    EmptyValue { key: String },

    #[error("query option '{key}' expects a number, got '{value}'")]
    InvalidNumber { key: String, value: String },

    #[error("query option '{key}' must not be negative, got '{value}'")]
    NegativeValue { key: String, value: String },

    #[error("{field}_min ({min}) is greater than {field}_max ({max})")]
    InvalidRange { field: String, min: f64, max: f64 },

    #[error("invalid sort '{value}': {reason}")]
    InvalidSort { value: String, reason: String },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, InvalidQueryError>;
