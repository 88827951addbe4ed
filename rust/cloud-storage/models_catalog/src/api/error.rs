//! API validation errors

use thiserror::Error;

use crate::shared::UnknownPropertyType;

/// Errors that can occur while validating a create-property request
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PropertyValidationError {
    #[error("Property uid cannot be empty")]
    EmptyUid,

    #[error("Property name cannot be empty")]
    EmptyName,

    #[error(transparent)]
    UnknownType(#[from] UnknownPropertyType),

    #[error("List-type property requires at least one value")]
    MissingValues,

    #[error("Int-type property should not have values")]
    UnexpectedValues,

    #[error("Value uid cannot be empty")]
    EmptyValueUid,
}

/// Errors that can occur while validating an item-property assignment
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AssignmentValidationError {
    #[error("List-type property '{0}' requires a value_uid")]
    MissingValueUid(String),

    #[error("List-type property '{0}' should not have a numeric value")]
    UnexpectedNumber(String),

    #[error("Int-type property '{0}' requires a value")]
    MissingNumber(String),

    #[error("Int-type property '{0}' should not have a value_uid")]
    UnexpectedValueUid(String),
}

/// Errors that can occur while validating a create-item request
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ItemValidationError {
    #[error("Item uid cannot be empty")]
    EmptyUid,

    #[error("Item name cannot be empty")]
    EmptyName,

    #[error("Property '{0}' is assigned more than once")]
    DuplicateProperty(String),
}
