//! Employees controller, nested below a company.

use super::{parse_company_id, parse_employee_id};
use crate::{
    extractors::{FieldsQuery, ValidQuery, ValidatedJson},
    hateoas::{with_links, LinkBuilder, LinkedCollection},
    responses::{created, no_content, ApiResult, AppError, ProblemDetails},
    state::AppState,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Response,
    routing::get,
    Json, Router,
};
use routine_core::{shape, ErrorResponse, FieldSelection};
use routine_service::{EmployeeAddDto, EmployeeDtoParameters, EmployeeUpdateDto};
use serde_json::Value;
use tracing::debug;

/// Creates the employees router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(list_employees_for_company).post(create_employee_for_company),
        )
        .route(
            "/:employee_id",
            get(get_employee_for_company)
                .put(update_employee_for_company)
                .delete(delete_employee_for_company),
        )
}

/// List the employees of a company.
#[utoipa::path(
    get,
    path = "/api/companies/{company_id}/employees",
    tag = "employees",
    params(("company_id" = String, Path, description = "Company ID"), EmployeeDtoParameters),
    responses(
        (status = 200, description = "Shaped employees", body = LinkedCollection),
        (status = 400, description = "Unknown orderBy or fields token, or bad gender", body = ErrorResponse),
        (status = 404, description = "Company not found", body = ErrorResponse)
    )
)]
pub async fn list_employees_for_company(
    State(state): State<AppState>,
    links: LinkBuilder,
    Path(company_id): Path<String>,
    ValidQuery(parameters): ValidQuery<EmployeeDtoParameters>,
) -> ApiResult<Json<LinkedCollection>> {
    debug!("List employees request: {} {:?}", company_id, parameters);

    let company_id = parse_company_id(&company_id)?;
    let employees = state
        .employee_service
        .list_employees(company_id, &parameters)
        .await?;

    let value: Vec<Value> = employees
        .into_iter()
        .map(|employee| {
            with_links(
                employee.record,
                links.employee_links(company_id, employee.id, None),
            )
        })
        .collect::<Result<_, _>>()?;

    Ok(Json(LinkedCollection {
        value,
        links: links.employee_list_links(company_id, &parameters),
    }))
}

/// Get one employee of a company.
#[utoipa::path(
    get,
    path = "/api/companies/{company_id}/employees/{employee_id}",
    tag = "employees",
    params(
        ("company_id" = String, Path, description = "Company ID"),
        ("employee_id" = String, Path, description = "Employee ID"),
        FieldsQuery
    ),
    responses(
        (status = 200, description = "Shaped employee with links", body = Object),
        (status = 400, description = "Unknown fields token", body = ErrorResponse),
        (status = 404, description = "Company or employee not found", body = ErrorResponse)
    )
)]
pub async fn get_employee_for_company(
    State(state): State<AppState>,
    links: LinkBuilder,
    Path((company_id, employee_id)): Path<(String, String)>,
    ValidQuery(query): ValidQuery<FieldsQuery>,
) -> ApiResult<Json<Value>> {
    debug!("Get employee request: {} / {}", company_id, employee_id);

    let company_id = parse_company_id(&company_id)?;
    let employee_id = parse_employee_id(&employee_id)?;
    let fields = query.fields.as_deref();

    let employee = state
        .employee_service
        .get_employee(company_id, employee_id, fields)
        .await?;

    Ok(Json(with_links(
        employee.record,
        links.employee_links(company_id, employee_id, fields),
    )?))
}

/// Hire an employee.
#[utoipa::path(
    post,
    path = "/api/companies/{company_id}/employees",
    tag = "employees",
    params(("company_id" = String, Path, description = "Company ID")),
    request_body = EmployeeAddDto,
    responses(
        (status = 201, description = "Employee created", body = Object,
            headers(("Location" = String, description = "URL of the new employee"))),
        (status = 404, description = "Company not found", body = ErrorResponse),
        (status = 409, description = "Duplicate employee number", body = ErrorResponse),
        (status = 422, description = "Invalid payload", body = ProblemDetails,
            content_type = "application/problem+json")
    )
)]
pub async fn create_employee_for_company(
    State(state): State<AppState>,
    links: LinkBuilder,
    Path(company_id): Path<String>,
    ValidatedJson(request): ValidatedJson<EmployeeAddDto>,
) -> ApiResult<Response> {
    debug!("Create employee request: {} for {}", request.employee_no, company_id);

    let company_id = parse_company_id(&company_id)?;
    let employee = state
        .employee_service
        .create_employee(company_id, request)
        .await?;
    let record = shape(&employee, &FieldSelection::all())?;

    created(
        &links.employee_url(company_id, employee.id),
        with_links(record, links.employee_links(company_id, employee.id, None))?,
    )
}

/// Replace an employee.
#[utoipa::path(
    put,
    path = "/api/companies/{company_id}/employees/{employee_id}",
    tag = "employees",
    params(
        ("company_id" = String, Path, description = "Company ID"),
        ("employee_id" = String, Path, description = "Employee ID")
    ),
    request_body = EmployeeAddDto,
    responses(
        (status = 204, description = "Employee updated"),
        (status = 404, description = "Company or employee not found", body = ErrorResponse),
        (status = 409, description = "Duplicate employee number", body = ErrorResponse),
        (status = 422, description = "Invalid payload", body = ProblemDetails,
            content_type = "application/problem+json")
    )
)]
pub async fn update_employee_for_company(
    State(state): State<AppState>,
    Path((company_id, employee_id)): Path<(String, String)>,
    ValidatedJson(request): ValidatedJson<EmployeeUpdateDto>,
) -> Result<StatusCode, AppError> {
    debug!("Update employee request: {} / {}", company_id, employee_id);

    let company_id = parse_company_id(&company_id)?;
    let employee_id = parse_employee_id(&employee_id)?;
    state
        .employee_service
        .update_employee(company_id, employee_id, request)
        .await?;

    Ok(no_content())
}

/// Remove an employee.
#[utoipa::path(
    delete,
    path = "/api/companies/{company_id}/employees/{employee_id}",
    tag = "employees",
    params(
        ("company_id" = String, Path, description = "Company ID"),
        ("employee_id" = String, Path, description = "Employee ID")
    ),
    responses(
        (status = 204, description = "Employee deleted"),
        (status = 404, description = "Company or employee not found", body = ErrorResponse)
    )
)]
pub async fn delete_employee_for_company(
    State(state): State<AppState>,
    Path((company_id, employee_id)): Path<(String, String)>,
) -> Result<StatusCode, AppError> {
    debug!("Delete employee request: {} / {}", company_id, employee_id);

    let company_id = parse_company_id(&company_id)?;
    let employee_id = parse_employee_id(&employee_id)?;
    state
        .employee_service
        .delete_employee(company_id, employee_id)
        .await?;

    Ok(no_content())
}
