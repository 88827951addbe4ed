//! API layer response types.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;

use crate::service::{Item, ItemProperty, ItemPropertyValue, Property, PropertyOption};
use crate::shared::PropertyType;

// ===== Property Responses =====

/// An allowed value of a categorical property.
#[derive(ToSchema, Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PropertyOptionResponse {
    pub value_uid: String,
    pub value: String,
}

/// Property response (API representation).
#[derive(ToSchema, Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PropertyResponse {
    pub uid: String,
    pub name: String,
    #[serde(rename = "type")]
    pub property_type: PropertyType,
    /// Only present for `list` properties
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<PropertyOptionResponse>>,
}

// ===== Item Responses =====

/// The value of an item property - the display text of a list value or an integer.
#[derive(ToSchema, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum AssignedValue {
    Number(i64),
    Text(String),
}

/// A property assigned to an item (API representation).
#[derive(ToSchema, Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ItemPropertyResponse {
    /// uid of the property
    pub uid: String,
    /// name of the property
    pub name: String,
    #[serde(default)]
    pub value_uid: Option<String>,
    pub value: AssignedValue,
}

/// Item response (API representation).
#[derive(ToSchema, Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ItemResponse {
    pub uid: String,
    pub name: String,
    pub properties: Vec<ItemPropertyResponse>,
}

// ===== Catalog Responses =====

/// One page of the catalog plus the size of the whole matching population.
#[derive(ToSchema, Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogPage {
    pub items: Vec<ItemResponse>,
    pub count: u64,
}

/// min/max of a numeric property over the filtered items
#[derive(ToSchema, Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct NumericFacet {
    pub min_value: i64,
    pub max_value: i64,
}

/// Facet of a single property.
#[derive(ToSchema, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum PropertyFacet {
    /// value uid -> number of filtered items holding that value
    Values(BTreeMap<String, u64>),
    /// range of the assigned integers
    Range(NumericFacet),
}

/// Facet statistics for the filtered item population.
/// Properties without any matching assignment are absent from `per_property`.
#[derive(ToSchema, Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct FilterStats {
    pub count: u64,
    pub per_property: BTreeMap<String, PropertyFacet>,
}

// ===== Conversions =====

impl From<PropertyOption> for PropertyOptionResponse {
    fn from(option: PropertyOption) -> Self {
        Self {
            value_uid: option.uid,
            value: option.text,
        }
    }
}

impl From<Property> for PropertyResponse {
    fn from(property: Property) -> Self {
        let values = property.property_type.has_values().then(|| {
            property
                .options
                .into_iter()
                .map(PropertyOptionResponse::from)
                .collect()
        });
        Self {
            uid: property.uid,
            name: property.name,
            property_type: property.property_type,
            values,
        }
    }
}

impl From<ItemProperty> for ItemPropertyResponse {
    fn from(prop: ItemProperty) -> Self {
        let (value_uid, value) = match prop.value {
            ItemPropertyValue::Categorical { value_uid, text } => {
                (Some(value_uid), AssignedValue::Text(text))
            }
            ItemPropertyValue::Numeric(n) => (None, AssignedValue::Number(n)),
        };
        Self {
            uid: prop.property_uid,
            name: prop.property_name,
            value_uid,
            value,
        }
    }
}

impl From<Item> for ItemResponse {
    fn from(item: Item) -> Self {
        Self {
            uid: item.uid,
            name: item.name,
            properties: item
                .properties
                .into_iter()
                .map(ItemPropertyResponse::from)
                .collect(),
        }
    }
}
