//! API layer types - external-facing request and response types.
//!
//! These structs represent the contract with the transport layer.
//! They use ToSchema for OpenAPI documentation and keep snake_case field names.

pub mod error;
pub mod requests;
pub mod responses;

pub use error::*;
pub use requests::*;
pub use responses::*;
