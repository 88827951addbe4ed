//! Catalog Models
//!
//! This crate defines the data models for the product catalog using a layered layout:
//!
//! - **shared**: Shared types (PropertyType) used across all layers
//! - **service**: Business logic layer types (used within catalog_service and its adapters)
//! - **api**: API layer types (external-facing requests/responses)

pub mod api;
pub mod service;
pub mod shared;

// Re-export commonly used shared types for convenience
pub use shared::PropertyType;
