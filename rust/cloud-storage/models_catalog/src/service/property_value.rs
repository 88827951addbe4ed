//! Service layer property value model.

use serde::{Deserialize, Serialize};

use crate::shared::PropertyType;

/// Payload of an item-property assignment.
///
/// The variant must agree with the [PropertyType] of the assigned property,
/// this is checked once when the assignment is built from a request.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum PropertyValue {
    /// Reference to one of the property's allowed values
    /// Serializes as: {"type": "Categorical", "value": "red"}
    Categorical(String),
    /// Integer payload
    /// Serializes as: {"type": "Numeric", "value": 42}
    Numeric(i64),
}

impl PropertyValue {
    /// The property type this payload is valid for
    pub fn property_type(&self) -> PropertyType {
        match self {
            PropertyValue::Categorical(_) => PropertyType::Categorical,
            PropertyValue::Numeric(_) => PropertyType::Numeric,
        }
    }

    pub fn as_value_uid(&self) -> Option<&str> {
        match self {
            PropertyValue::Categorical(uid) => Some(uid),
            PropertyValue::Numeric(_) => None,
        }
    }

    pub fn as_number(&self) -> Option<i64> {
        match self {
            PropertyValue::Numeric(n) => Some(*n),
            PropertyValue::Categorical(_) => None,
        }
    }
}

/// A validated assignment of a value to a property, ready to be persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyAssignment {
    pub property_uid: String,
    pub value: PropertyValue,
}
