//! Checkout error taxonomy.

use stores::StoreError;
use thiserror::Error;

/// Errors surfaced by the checkout pipeline.
///
/// `Validation` and `NotFound` are safe to show to the caller; `Internal`
/// is opaque (its payload is logged, never displayed). Any of these aborts
/// the whole batch — there is no partial success.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CheckoutError {
    /// The caller presented no credential.
    #[error("caller is not authenticated")]
    Unauthenticated,

    /// A field of the request failed cross-entity validation.
    #[error("invalid {field}: {message}")]
    Validation {
        field: &'static str,
        message: String,
    },

    /// A referenced record does not exist (or is owned by another merchant).
    #[error("{entity} not found")]
    NotFound { entity: &'static str },

    /// A collaborator store failed; details are logged, not displayed.
    #[error("internal error")]
    Internal(String),

    /// The operation's deadline elapsed or the caller cancelled it.
    #[error("checkout cancelled before completion")]
    Cancelled,
}

impl CheckoutError {
    /// Builds a field-tagged validation error.
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            field,
            message: message.into(),
        }
    }

    /// Maps a store outcome onto the checkout taxonomy, tagging not-found
    /// results with the entity that was being fetched.
    pub(crate) fn from_store(entity: &'static str, err: StoreError) -> Self {
        match err {
            StoreError::NotFound => Self::NotFound { entity },
            StoreError::Internal(detail) => Self::Internal(detail),
        }
    }
}

/// Convenience type alias for checkout results.
pub type Result<T> = std::result::Result<T, CheckoutError>;
