//! Data Transfer Objects (DTOs).

mod company_dto;
mod employee_dto;
mod parameters;
mod resource;

pub use company_dto::*;
pub use employee_dto::*;
pub use parameters::*;
pub use resource::*;
