//! OpenAPI documentation configuration.
//!
//! This module provides OpenAPI/Swagger documentation generation for the REST API.

use crate::controllers::{HealthResponse, ReadinessResponse};
use crate::hateoas::{Link, LinkedCollection};
use crate::responses::ProblemDetails;
use routine_core::{CompanyId, EmployeeId, ErrorResponse, FieldError, Gender, PaginationMetadata};
use routine_service::{CompanyAddDto, CompanyDto, EmployeeAddDto, EmployeeDto};
use utoipa::OpenApi;

/// OpenAPI documentation for the Routine API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Routine API",
        version = "1.0.0",
        description = "Companies and their employees, with paging, sorting, field shaping and hypermedia links",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    ),
    paths(
        // Company endpoints
        crate::controllers::company_controller::list_companies,
        crate::controllers::company_controller::get_company,
        crate::controllers::company_controller::create_company,
        crate::controllers::company_controller::companies_options,
        crate::controllers::company_controller::delete_company,
        // Company collection endpoints
        crate::controllers::company_collection_controller::get_company_collection,
        crate::controllers::company_collection_controller::create_company_collection,
        // Employee endpoints
        crate::controllers::employee_controller::list_employees_for_company,
        crate::controllers::employee_controller::get_employee_for_company,
        crate::controllers::employee_controller::create_employee_for_company,
        crate::controllers::employee_controller::update_employee_for_company,
        crate::controllers::employee_controller::delete_employee_for_company,
        // Health endpoints
        crate::controllers::health_controller::health_check,
        crate::controllers::health_controller::readiness_check,
        crate::controllers::health_controller::liveness_check,
    ),
    components(
        schemas(
            // Core types
            CompanyId,
            EmployeeId,
            Gender,
            PaginationMetadata,
            ErrorResponse,
            FieldError,
            ProblemDetails,
            // Company DTOs
            CompanyDto,
            CompanyAddDto,
            // Employee DTOs
            EmployeeDto,
            EmployeeAddDto,
            // Hypermedia
            Link,
            LinkedCollection,
            // Health
            HealthResponse,
            ReadinessResponse,
        )
    ),
    tags(
        (name = "companies", description = "Company endpoints"),
        (name = "company_collections", description = "Batch company endpoints"),
        (name = "employees", description = "Employee endpoints"),
        (name = "health", description = "Health check endpoints")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_every_resource() {
        let doc = ApiDoc::openapi();
        let paths: Vec<_> = doc.paths.paths.keys().map(String::as_str).collect();

        for expected in [
            "/api/companies",
            "/api/companies/{company_id}",
            "/api/companycollections",
            "/api/companycollections/{ids}",
            "/api/companies/{company_id}/employees",
            "/api/companies/{company_id}/employees/{employee_id}",
            "/health",
        ] {
            assert!(paths.contains(&expected), "missing {expected}");
        }
    }
}
