//! Property type shared across storage, service, and API layers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use utoipa::ToSchema;

/// Type of a catalog property. Fixed when the property is created.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq, Eq, Hash)]
pub enum PropertyType {
    /// Categorical property with a fixed set of allowed values.
    #[serde(rename = "list")]
    Categorical,
    /// Integer property, values are assigned per item.
    #[serde(rename = "int")]
    Numeric,
}

impl PropertyType {
    /// Only categorical properties own a value set
    pub fn has_values(&self) -> bool {
        matches!(self, PropertyType::Categorical)
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyType::Categorical => write!(f, "list"),
            PropertyType::Numeric => write!(f, "int"),
        }
    }
}

/// encountered a property type string that is not `list` or `int`
#[derive(Debug, Error, Clone, PartialEq)]
#[error("Invalid property type: '{0}'. Must be 'list' or 'int'")]
pub struct UnknownPropertyType(pub String);

impl FromStr for PropertyType {
    type Err = UnknownPropertyType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "list" => Ok(PropertyType::Categorical),
            "int" => Ok(PropertyType::Numeric),
            other => Err(UnknownPropertyType(other.to_string())),
        }
    }
}
