//! # Routine Service
//!
//! Company and employee use cases. Every list and lookup runs the same
//! pipeline: resolve `orderBy` through the mapping registry, check `fields`
//! against the DTO shape, query the repository, then shape the DTOs.

pub mod company_service;
pub mod dto;
pub mod employee_service;
pub mod r#impl;
pub mod mappers;
pub mod property_mappings;

pub use company_service::*;
pub use dto::*;
pub use employee_service::*;
pub use property_mappings::*;
pub use r#impl::{
    CompanyServiceImpl, CompanyServiceImplParameters, EmployeeServiceImpl,
    EmployeeServiceImplParameters,
};
