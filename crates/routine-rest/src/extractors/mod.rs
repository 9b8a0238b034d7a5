//! Custom Axum extractors.

mod json;
mod links;
mod query;
mod validated;

pub use json::*;
pub use links::*;
pub use query::*;
pub use validated::*;
