//! Commerce error types.
//!
//! The cart itself never fails; these errors come from loading and
//! validating catalog data and from persisting the delivery location.

use thiserror::Error;

/// Errors that can occur in catalog and location operations.
#[derive(Error, Debug)]
pub enum CommerceError {
    /// Product not found.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Two catalog records share an identifier.
    #[error("Duplicate product id in catalog: {0}")]
    DuplicateProduct(String),

    /// Unknown currency code.
    #[error("Unknown currency: {0}")]
    UnknownCurrency(String),

    /// Cache error.
    #[error("Cache error: {0}")]
    CacheError(#[from] storefront_cache::CacheError),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Validation error.
    #[error("Validation error: {0}")]
    ValidationError(String),
}

impl From<serde_json::Error> for CommerceError {
    fn from(e: serde_json::Error) -> Self {
        CommerceError::SerializationError(e.to_string())
    }
}
