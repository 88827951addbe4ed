//! Catalog service library following hexagonal architecture pattern
//!
//! This library provides the faceted query engine over the product catalog
//! (filter parsing, query composition, facet aggregation and result caching)
//! and can be composed into various runtime contexts (services, workers, lambdas, etc.)

pub mod config;
pub mod domain;
pub mod outbound;

pub use config::{CatalogSettings, Config};
