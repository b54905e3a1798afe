//! HTTP presentation layer for the payee service
//!
//! This module provides:
//! - `ServerBuilder` to pick a store and policy and serve the API
//! - the route table under `/api/v1`
//! - handlers and the `ValidatedJson` body extractor

pub mod builder;
pub mod extractor;
pub mod handlers;
pub mod router;

pub use builder::ServerBuilder;
pub use extractor::ValidatedJson;
pub use router::{API_PREFIX, build_router, payee_routes};
