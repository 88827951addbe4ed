//! Service layer item model.

use serde::{Deserialize, Serialize};

use super::{PropertyAssignment, PropertyValue};

/// Value of an assignment as read back from storage, with the display text
/// of categorical values resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemPropertyValue {
    Categorical { value_uid: String, text: String },
    Numeric(i64),
}

impl ItemPropertyValue {
    /// Drop the resolved text and return the raw payload
    pub fn to_property_value(&self) -> PropertyValue {
        match self {
            ItemPropertyValue::Categorical { value_uid, .. } => {
                PropertyValue::Categorical(value_uid.clone())
            }
            ItemPropertyValue::Numeric(n) => PropertyValue::Numeric(*n),
        }
    }
}

/// One property assigned to an item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemProperty {
    pub property_uid: String,
    pub property_name: String,
    pub value: ItemPropertyValue,
}

/// A catalog item with all of its assignments
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub uid: String,
    pub name: String,
    /// Ordered by property uid
    pub properties: Vec<ItemProperty>,
}

impl Item {
    /// The assignment for `property_uid`, if the item has one
    pub fn property(&self, property_uid: &str) -> Option<&ItemProperty> {
        self.properties
            .iter()
            .find(|p| p.property_uid == property_uid)
    }
}

/// An item that passed validation and is about to be inserted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewItem {
    pub uid: String,
    pub name: String,
    pub assignments: Vec<PropertyAssignment>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_property_lookup() {
        let item = Item {
            uid: "A".to_string(),
            name: "Alpha".to_string(),
            properties: vec![ItemProperty {
                property_uid: "color".to_string(),
                property_name: "Color".to_string(),
                value: ItemPropertyValue::Categorical {
                    value_uid: "red".to_string(),
                    text: "Red".to_string(),
                },
            }],
        };

        let color = item.property("color").unwrap();
        assert_eq!(
            color.value.to_property_value(),
            PropertyValue::Categorical("red".to_string())
        );
        assert!(item.property("size").is_none());
    }
}
