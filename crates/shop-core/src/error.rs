//! # Storefront Error Types
//!
//! Typed error handling for the cardstore engine.
//! Fallible operations in the core and gateway crates return `ShopResult<T>`.

use thiserror::Error;

/// Core error type for storefront operations
#[derive(Debug, Error)]
pub enum ShopError {
    /// Configuration errors (missing keys, invalid config)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Product not found in the catalog
    #[error("Product not found: {id}")]
    ProductNotFound { id: String },

    /// Category not found
    #[error("Category not found: {slug}")]
    CategoryNotFound { slug: String },

    /// Payment provider API error
    #[error("Provider error [{provider}]: {message}")]
    Provider { provider: String, message: String },

    /// Network/HTTP error communicating with a provider
    #[error("Network error: {0}")]
    Network(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Internal error (should not happen)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ShopError {
    /// Returns the HTTP status code appropriate for this error
    pub fn status_code(&self) -> u16 {
        match self {
            ShopError::Configuration(_) => 500,
            ShopError::InvalidRequest(_) => 400,
            ShopError::ProductNotFound { .. } => 404,
            ShopError::CategoryNotFound { .. } => 404,
            ShopError::Provider { .. } => 502,
            ShopError::Network(_) => 503,
            ShopError::Serialization(_) => 500,
            ShopError::Internal(_) => 500,
        }
    }
}

/// Result type alias for storefront operations
pub type ShopResult<T> = Result<T, ShopError>;
