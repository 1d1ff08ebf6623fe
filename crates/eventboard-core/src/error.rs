// Error types for catalog operations

use thiserror::Error;

/// Result type alias for catalog operations
pub type Result<T> = std::result::Result<T, CatalogError>;

/// Errors raised by catalog rules before anything reaches storage
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    /// Input rejected by a business rule
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Could not produce an unused external identifier
    #[error("Could not allocate a unique {entity} ID after {attempts} attempts")]
    IdSpaceExhausted { entity: &'static str, attempts: usize },
}

impl CatalogError {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        CatalogError::Validation(msg.into())
    }

    /// Create an ID exhaustion error
    pub fn id_space_exhausted(entity: &'static str, attempts: usize) -> Self {
        CatalogError::IdSpaceExhausted { entity, attempts }
    }
}
