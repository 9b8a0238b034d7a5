//! HTTP middleware.

mod error_context;
mod http_cache;
mod logging;

pub use error_context::*;
pub use http_cache::*;
pub use logging::*;
