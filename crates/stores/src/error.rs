//! Store error types.

use thiserror::Error;

/// Outcome of a failed store call.
///
/// `NotFound` is a normal, caller-visible outcome; `Internal` is opaque and
/// only its presence (not its content) is meant for callers.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    /// The requested record does not exist.
    #[error("record not found")]
    NotFound,

    /// The underlying storage failed.
    #[error("storage error: {0}")]
    Internal(String),
}

/// Convenience type alias for store results.
pub type Result<T> = std::result::Result<T, StoreError>;
