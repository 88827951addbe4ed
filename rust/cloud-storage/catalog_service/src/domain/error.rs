//! Domain error types

use models_catalog::api::{AssignmentValidationError, ItemValidationError, PropertyValidationError};
use thiserror::Error;

use crate::domain::filter_parser::FilterParseError;

/// Domain-level errors for catalog operations
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Referenced item, property or value does not exist
    #[error("{0}")]
    NotFound(String),

    /// Duplicate uid on create
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Validation error
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Request parameters that could not be parsed
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    /// Internal error (wraps storage errors)
    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// Result type for domain operations
pub type Result<T> = std::result::Result<T, CatalogError>;

impl From<PropertyValidationError> for CatalogError {
    fn from(err: PropertyValidationError) -> Self {
        CatalogError::ValidationError(err.to_string())
    }
}

impl From<ItemValidationError> for CatalogError {
    fn from(err: ItemValidationError) -> Self {
        CatalogError::ValidationError(err.to_string())
    }
}

impl From<AssignmentValidationError> for CatalogError {
    fn from(err: AssignmentValidationError) -> Self {
        CatalogError::ValidationError(err.to_string())
    }
}

impl From<FilterParseError> for CatalogError {
    fn from(err: FilterParseError) -> Self {
        CatalogError::MalformedInput(err.to_string())
    }
}
