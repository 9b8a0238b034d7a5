//! REST API controllers.

pub mod company_collection_controller;
pub mod company_controller;
pub mod employee_controller;
pub mod health_controller;

pub use health_controller::*;

use crate::responses::AppError;
use routine_core::{CompanyId, EmployeeId, RoutineError};

/// Parses a company id path segment.
pub(crate) fn parse_company_id(id: &str) -> Result<CompanyId, AppError> {
    id.parse()
        .map_err(|_| AppError(RoutineError::invalid_query(format!("Invalid company ID: {}", id))))
}

/// Parses an employee id path segment.
pub(crate) fn parse_employee_id(id: &str) -> Result<EmployeeId, AppError> {
    id.parse()
        .map_err(|_| AppError(RoutineError::invalid_query(format!("Invalid employee ID: {}", id))))
}
