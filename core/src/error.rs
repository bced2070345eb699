//! Error types for value construction and parsing.
//!
//! Every constructor in this crate validates its input up front, so an
//! illegal value is never observable. The variant tells the caller what
//! kind of input was rejected.

use thiserror::Error;

/// Errors raised while building or parsing commons values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommonsError {
    /// A required input was absent (`None` or a JSON `null`).
    #[error("null argument: {0}")]
    NullArgument(String),

    /// A present input was rejected (bad locale tag, blank path, ...).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A string did not match the expected textual format.
    #[error("invalid format: {0}")]
    InvalidFormat(String),

    /// A date string matched none of the supported ISO 8601 formats.
    #[error("parse error: {0}")]
    Parse(String),

    /// The value would violate an invariant if constructed.
    #[error("invalid state: {0}")]
    InvalidState(String),

    /// A required resource could not be found.
    #[error("not found: {0}")]
    NotFound(String),
}

/// Convenience alias for results with [`CommonsError`].
pub type Result<T> = std::result::Result<T, CommonsError>;
