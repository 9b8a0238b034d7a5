//! # Routine Core
//!
//! Core types, traits, and error definitions for the Routine API.
//! Besides the domain model this crate hosts the query pipeline shared by
//! every resource: property mapping, field selection, dynamic sorting,
//! data shaping and paging.

pub mod domain;
pub mod error;
pub mod fields;
pub mod id;
pub mod mapping;
pub mod pagination;
pub mod result;
pub mod shaping;
pub mod sorting;
pub mod traits;
pub mod validation;

pub use domain::*;
pub use error::*;
pub use fields::*;
pub use id::*;
pub use mapping::*;
pub use pagination::*;
pub use result::*;
pub use shaping::*;
pub use sorting::*;
pub use traits::*;
pub use validation::*;

// Re-export shaku for dependency injection
pub use shaku::Interface;
