//! Service layer property model.

use serde::{Deserialize, Serialize};

use crate::shared::PropertyType;

/// An allowed value of a categorical property.
/// `uid` is unique across every property, not only within its owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyOption {
    pub uid: String,
    pub property_uid: String,
    pub text: String,
}

/// A registered property together with its allowed values.
/// Numeric properties always carry an empty `options` list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Property {
    pub uid: String,
    pub name: String,
    pub property_type: PropertyType,
    /// Allowed values in declaration order
    pub options: Vec<PropertyOption>,
}

impl Property {
    /// Create a numeric property
    pub fn numeric(uid: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            name: name.into(),
            property_type: PropertyType::Numeric,
            options: Vec::new(),
        }
    }

    /// Create a categorical property from `(value_uid, text)` pairs
    pub fn categorical<I, U, T>(uid: impl Into<String>, name: impl Into<String>, options: I) -> Self
    where
        I: IntoIterator<Item = (U, T)>,
        U: Into<String>,
        T: Into<String>,
    {
        let uid = uid.into();
        let options = options
            .into_iter()
            .map(|(value_uid, text)| PropertyOption {
                uid: value_uid.into(),
                property_uid: uid.clone(),
                text: text.into(),
            })
            .collect();
        Self {
            uid,
            name: name.into(),
            property_type: PropertyType::Categorical,
            options,
        }
    }

    /// Look up one of this property's allowed values
    pub fn option(&self, value_uid: &str) -> Option<&PropertyOption> {
        self.options.iter().find(|o| o.uid == value_uid)
    }

    pub fn is_categorical(&self) -> bool {
        self.property_type == PropertyType::Categorical
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categorical_constructor_links_options() {
        let color = Property::categorical("color", "Color", [("red", "Red"), ("blue", "Blue")]);

        assert!(color.is_categorical());
        assert_eq!(color.options.len(), 2);
        assert!(color.options.iter().all(|o| o.property_uid == "color"));
        assert_eq!(color.option("blue").map(|o| o.text.as_str()), Some("Blue"));
        assert!(color.option("green").is_none());
    }

    #[test]
    fn test_numeric_constructor_has_no_options() {
        let price = Property::numeric("price", "Price");
        assert!(!price.is_categorical());
        assert!(price.options.is_empty());
    }
}
