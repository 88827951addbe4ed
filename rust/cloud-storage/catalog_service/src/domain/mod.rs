//! Domain layer - core business logic, models, and port definitions

pub mod error;
pub mod facets;
pub mod filter_parser;
pub mod models;
pub mod page_cache;
pub mod ports;
pub mod query_composer;
pub mod services;

pub use error::*;
