//! Service layer types - the typed catalog model shared by the domain and its adapters.

pub mod item;
pub mod property;
pub mod property_value;

pub use item::{Item, ItemProperty, ItemPropertyValue, NewItem};
pub use property::{Property, PropertyOption};
pub use property_value::{PropertyAssignment, PropertyValue};
