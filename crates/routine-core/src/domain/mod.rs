//! Domain entities and value objects for companies and their employees.

pub mod entities;
pub mod value_objects;

pub use entities::*;
pub use value_objects::*;
