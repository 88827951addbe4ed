//! API layer request types.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use utoipa::ToSchema;

use crate::api::error::{
    AssignmentValidationError, ItemValidationError, PropertyValidationError,
};
use crate::service::PropertyValue;
use crate::shared::PropertyType;

// ===== Property Requests =====

/// An allowed value supplied when creating a categorical property.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct PropertyOptionInput {
    pub value_uid: String,
    pub value: String,
}

/// Request to register a new property.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct CreatePropertyRequest {
    pub uid: String,
    pub name: String,
    /// `list` or `int`
    #[serde(rename = "type")]
    pub property_type: String,
    #[serde(default)]
    pub values: Option<Vec<PropertyOptionInput>>,
}

impl CreatePropertyRequest {
    /// Validate the request shape and return the parsed property type
    pub fn validate(&self) -> Result<PropertyType, PropertyValidationError> {
        if self.uid.trim().is_empty() {
            return Err(PropertyValidationError::EmptyUid);
        }
        if self.name.trim().is_empty() {
            return Err(PropertyValidationError::EmptyName);
        }

        let property_type: PropertyType = self.property_type.parse()?;
        let values = self.values.as_deref().unwrap_or_default();

        match property_type {
            PropertyType::Categorical if values.is_empty() => {
                return Err(PropertyValidationError::MissingValues);
            }
            PropertyType::Numeric if !values.is_empty() => {
                return Err(PropertyValidationError::UnexpectedValues);
            }
            _ => {}
        }

        if values.iter().any(|v| v.value_uid.trim().is_empty()) {
            return Err(PropertyValidationError::EmptyValueUid);
        }

        Ok(property_type)
    }
}

// ===== Item Requests =====

/// A property assignment supplied when creating an item.
/// Exactly one of `value_uid` (list properties) or `value` (int properties) must be set.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct ItemPropertyInput {
    /// uid of the assigned property
    pub uid: String,
    #[serde(default)]
    pub value_uid: Option<String>,
    #[serde(default)]
    pub value: Option<i64>,
}

impl ItemPropertyInput {
    /// Build the typed payload for a property of type `property_type`
    pub fn to_property_value(
        &self,
        property_type: PropertyType,
    ) -> Result<PropertyValue, AssignmentValidationError> {
        match (property_type, &self.value_uid, self.value) {
            (PropertyType::Categorical, Some(value_uid), None) => {
                Ok(PropertyValue::Categorical(value_uid.clone()))
            }
            (PropertyType::Categorical, None, _) => {
                Err(AssignmentValidationError::MissingValueUid(self.uid.clone()))
            }
            (PropertyType::Categorical, Some(_), Some(_)) => {
                Err(AssignmentValidationError::UnexpectedNumber(self.uid.clone()))
            }
            (PropertyType::Numeric, None, Some(n)) => Ok(PropertyValue::Numeric(n)),
            (PropertyType::Numeric, Some(_), _) => Err(
                AssignmentValidationError::UnexpectedValueUid(self.uid.clone()),
            ),
            (PropertyType::Numeric, None, None) => {
                Err(AssignmentValidationError::MissingNumber(self.uid.clone()))
            }
        }
    }
}

/// Request to create a new item.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct CreateItemRequest {
    pub uid: String,
    pub name: String,
    #[serde(default)]
    pub properties: Vec<ItemPropertyInput>,
}

impl CreateItemRequest {
    /// Validate the parts of the request that do not need the property registry
    pub fn validate(&self) -> Result<(), ItemValidationError> {
        if self.uid.trim().is_empty() {
            return Err(ItemValidationError::EmptyUid);
        }
        if self.name.trim().is_empty() {
            return Err(ItemValidationError::EmptyName);
        }

        let mut seen = HashSet::new();
        for prop in &self.properties {
            if !seen.insert(prop.uid.as_str()) {
                return Err(ItemValidationError::DuplicateProperty(prop.uid.clone()));
            }
        }

        Ok(())
    }
}
