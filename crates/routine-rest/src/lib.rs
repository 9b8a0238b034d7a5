//! # Routine REST
//!
//! REST API layer using Axum for the Routine API.
//! Exposes companies, company collections and employees with paging,
//! field shaping and hypermedia links, plus health checks and the
//! OpenAPI document.

pub mod controllers;
pub mod extractors;
pub mod hateoas;
pub mod middleware;
pub mod openapi;
pub mod responses;
pub mod router;
pub mod state;

pub use hateoas::*;
pub use router::*;
pub use state::*;
