//! Company collections controller: read and create several companies at once.

use crate::{
    extractors::JsonBody,
    hateoas::LinkBuilder,
    responses::{created, ApiResult, AppError, ProblemDetails},
    state::AppState,
};
use axum::{
    extract::{Path, State},
    response::Response,
    routing::{get, post},
    Json, Router,
};
use routine_core::{CompanyId, ErrorResponse, RoutineError};
use routine_service::{CompanyAddDto, CompanyDto};
use tracing::{debug, warn};

/// Creates the company collections router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_company_collection))
        .route("/:ids", get(get_company_collection))
}

/// Parses `({id1},{id2},...)`.
///
/// Blank entries are skipped; an empty list or any malformed id rejects
/// the whole path.
pub fn parse_id_list(raw: &str) -> Result<Vec<CompanyId>, AppError> {
    let invalid = || AppError(RoutineError::invalid_query(format!("Invalid id list: {}", raw)));

    let inner = raw
        .trim()
        .strip_prefix('(')
        .and_then(|rest| rest.strip_suffix(')'))
        .ok_or_else(invalid)?;

    let ids = inner
        .split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(|id| id.parse::<CompanyId>().map_err(|_| invalid()))
        .collect::<Result<Vec<_>, _>>()?;

    if ids.is_empty() {
        warn!("Rejected empty id list");
        return Err(invalid());
    }
    Ok(ids)
}

/// Get several companies by ID.
#[utoipa::path(
    get,
    path = "/api/companycollections/{ids}",
    tag = "company_collections",
    params(("ids" = String, Path, description = "Comma separated ids in parentheses, e.g. (id1,id2)")),
    responses(
        (status = 200, description = "Companies ordered by name", body = Vec<CompanyDto>),
        (status = 400, description = "Malformed id list", body = ErrorResponse),
        (status = 404, description = "At least one company does not exist", body = ErrorResponse)
    )
)]
pub async fn get_company_collection(
    State(state): State<AppState>,
    Path(ids): Path<String>,
) -> ApiResult<Json<Vec<CompanyDto>>> {
    debug!("Get company collection request: {}", ids);

    let ids = parse_id_list(&ids)?;
    let companies = state.company_service.get_companies(&ids).await?;
    Ok(Json(companies))
}

/// Create several companies in one transaction.
#[utoipa::path(
    post,
    path = "/api/companycollections",
    tag = "company_collections",
    request_body = Vec<CompanyAddDto>,
    responses(
        (status = 201, description = "Companies created", body = Vec<CompanyDto>,
            headers(("Location" = String, description = "URL of the new collection"))),
        (status = 409, description = "Duplicate employee number", body = ErrorResponse),
        (status = 422, description = "Invalid payload", body = ProblemDetails,
            content_type = "application/problem+json")
    )
)]
pub async fn create_company_collection(
    State(state): State<AppState>,
    links: LinkBuilder,
    JsonBody(requests): JsonBody<Vec<CompanyAddDto>>,
) -> ApiResult<Response> {
    debug!("Create company collection request: {} companies", requests.len());

    let companies = state.company_service.create_companies(requests).await?;
    let ids: Vec<CompanyId> = companies.iter().map(|company| company.id).collect();

    created(&links.company_collection_url(&ids), companies)
}
