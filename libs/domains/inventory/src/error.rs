//! Inventory domain error types

use thiserror::Error;

/// Result type for catalog operations
pub type Result<T> = std::result::Result<T, InventoryError>;

/// Inventory domain errors
///
/// Storage failures surface verbatim to the caller; there is no retry or
/// masking anywhere in this crate.
#[derive(Debug, Error)]
pub enum InventoryError {
    #[error("Product not found: {0}")]
    ProductNotFound(i64),

    #[error("Store not found: {0}")]
    StoreNotFound(i64),

    #[error("Store {0} still owns products")]
    StoreNotEmpty(i64),

    #[error("Unsupported sort key: '{0}'")]
    UnsupportedSortKey(String),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<validator::ValidationErrors> for InventoryError {
    fn from(err: validator::ValidationErrors) -> Self {
        Self::Validation(err.to_string())
    }
}
