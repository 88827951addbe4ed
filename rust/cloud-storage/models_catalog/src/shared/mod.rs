pub mod property_type;

pub use property_type::{PropertyType, UnknownPropertyType};
