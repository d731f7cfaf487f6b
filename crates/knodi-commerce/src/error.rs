//! Commerce error types.

use thiserror::Error;

/// Errors raised at the boundary of the state container.
///
/// The reducers themselves never fail; these come from turning loose
/// catalog records and configuration values into typed domain values.
#[derive(Error, Debug)]
pub enum CommerceError {
    /// A required field is missing or blank.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A price is missing, negative, not finite or too large to represent.
    #[error("Invalid price for product {product}: {reason}")]
    InvalidPrice { product: String, reason: String },

    /// Deserialized state that breaks a cart or favorites invariant.
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Currency code not recognised.
    #[error("Unknown currency: {0}")]
    UnknownCurrency(String),

    /// Favorites sort order not recognised.
    #[error("Unknown sort order: {0}")]
    UnknownSortOrder(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for CommerceError {
    fn from(e: serde_json::Error) -> Self {
        CommerceError::Serialization(e.to_string())
    }
}
