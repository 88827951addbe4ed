//! Domain models
//!
//! Catalog data types are re-exported from models_catalog, the query-side
//! types (filters, predicates, page windows) live here.

mod filter;
mod query;
mod requests;

pub use filter::*;
pub use query::*;
pub use requests::*;

pub use models_catalog::PropertyType;
pub use models_catalog::api::{
    CatalogPage, CreateItemRequest, CreatePropertyRequest, FilterStats, ItemResponse,
    NumericFacet, PropertyFacet, PropertyResponse,
};
pub use models_catalog::service::{
    Item, ItemProperty, ItemPropertyValue, NewItem, Property, PropertyAssignment, PropertyOption,
    PropertyValue,
};
