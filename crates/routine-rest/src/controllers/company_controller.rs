//! Companies controller.

use super::parse_company_id;
use crate::{
    extractors::{FieldsQuery, ValidQuery, ValidatedJson},
    hateoas::{with_links, LinkBuilder, LinkedCollection},
    responses::{created, header_value, no_content, ApiResult, AppError, ProblemDetails},
    state::AppState,
};
use axum::{
    extract::{Path, State},
    http::{header, HeaderName, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use routine_core::{shape, ErrorResponse, FieldSelection};
use routine_service::{CompanyAddDto, CompanyDtoParameters};
use tracing::debug;

/// Header carrying the `PaginationMetadata` of a page as JSON.
pub const X_PAGINATION: HeaderName = HeaderName::from_static("x-pagination");

/// Creates the companies router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(list_companies)
                .post(create_company)
                .options(companies_options),
        )
        .route("/:company_id", get(get_company).delete(delete_company))
}

/// List companies.
#[utoipa::path(
    get,
    path = "/api/companies",
    tag = "companies",
    params(CompanyDtoParameters),
    responses(
        (status = 200, description = "One page of shaped companies", body = LinkedCollection,
            headers(("X-Pagination" = String, description = "Paging metadata as JSON"))),
        (status = 400, description = "Unknown orderBy or fields token, or bad paging", body = ErrorResponse)
    )
)]
pub async fn list_companies(
    State(state): State<AppState>,
    links: LinkBuilder,
    ValidQuery(parameters): ValidQuery<CompanyDtoParameters>,
) -> ApiResult<Response> {
    debug!("List companies request: {:?}", parameters);

    let page = state.company_service.list_companies(&parameters).await?;
    let metadata = page.metadata();
    let pagination = serde_json::to_string(&metadata).map_err(|e| AppError(e.into()))?;

    let value: Vec<serde_json::Value> = page
        .items
        .into_iter()
        .map(|company| with_links(company.record, links.company_links(company.id, None)))
        .collect::<Result<_, _>>()?;
    let body = LinkedCollection {
        links: links.company_page_links(&parameters, &metadata),
        value,
    };

    Ok(([(X_PAGINATION, header_value(&pagination)?)], Json(body)).into_response())
}

/// Get a company by ID.
#[utoipa::path(
    get,
    path = "/api/companies/{company_id}",
    tag = "companies",
    params(("company_id" = String, Path, description = "Company ID"), FieldsQuery),
    responses(
        (status = 200, description = "Shaped company with links", body = Object),
        (status = 400, description = "Unknown fields token", body = ErrorResponse),
        (status = 404, description = "Company not found", body = ErrorResponse)
    )
)]
pub async fn get_company(
    State(state): State<AppState>,
    links: LinkBuilder,
    Path(company_id): Path<String>,
    ValidQuery(query): ValidQuery<FieldsQuery>,
) -> ApiResult<Json<serde_json::Value>> {
    debug!("Get company request: {}", company_id);

    let company_id = parse_company_id(&company_id)?;
    let fields = query.fields.as_deref();
    let company = state.company_service.get_company(company_id, fields).await?;

    Ok(Json(with_links(
        company.record,
        links.company_links(company_id, fields),
    )?))
}

/// Create a company, optionally with employees.
#[utoipa::path(
    post,
    path = "/api/companies",
    tag = "companies",
    request_body = CompanyAddDto,
    responses(
        (status = 201, description = "Company created", body = Object,
            headers(("Location" = String, description = "URL of the new company"))),
        (status = 409, description = "Duplicate employee number", body = ErrorResponse),
        (status = 422, description = "Invalid payload", body = ProblemDetails,
            content_type = "application/problem+json")
    )
)]
pub async fn create_company(
    State(state): State<AppState>,
    links: LinkBuilder,
    ValidatedJson(request): ValidatedJson<CompanyAddDto>,
) -> ApiResult<Response> {
    debug!("Create company request: {}", request.name);

    let company = state.company_service.create_company(request).await?;
    let record = shape(&company, &FieldSelection::all())?;

    created(
        &links.company_url(company.id),
        with_links(record, links.company_links(company.id, None))?,
    )
}

/// Supported methods on the companies collection.
#[utoipa::path(
    options,
    path = "/api/companies",
    tag = "companies",
    responses((status = 200, description = "Allowed methods",
        headers(("Allow" = String, description = "GET,POST,OPTIONS"))))
)]
pub async fn companies_options() -> impl IntoResponse {
    (StatusCode::OK, [(header::ALLOW, "GET,POST,OPTIONS")])
}

/// Delete a company and its employees.
#[utoipa::path(
    delete,
    path = "/api/companies/{company_id}",
    tag = "companies",
    params(("company_id" = String, Path, description = "Company ID")),
    responses(
        (status = 204, description = "Company deleted"),
        (status = 404, description = "Company not found", body = ErrorResponse)
    )
)]
pub async fn delete_company(
    State(state): State<AppState>,
    Path(company_id): Path<String>,
) -> Result<StatusCode, AppError> {
    debug!("Delete company request: {}", company_id);

    let company_id = parse_company_id(&company_id)?;
    state.company_service.delete_company(company_id).await?;

    Ok(no_content())
}
