//! Query parameters accepted by the list endpoints.

use serde::{Deserialize, Serialize};
use utoipa::IntoParams;

/// Exposed field the company list is ordered by when the client sends no `orderBy`.
pub const DEFAULT_COMPANY_ORDER_BY: &str = "CompanyName";

/// Exposed field the employee list is ordered by when the client sends no `orderBy`.
pub const DEFAULT_EMPLOYEE_ORDER_BY: &str = "EmployeeNo";

/// Filters, ordering, shaping and paging for `GET /api/companies`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct CompanyDtoParameters {
    /// Exact company name.
    pub company_name: Option<String>,
    /// Substring of the company name or introduction.
    pub search_term: Option<String>,
    /// 1-based page number.
    pub page_number: Option<i64>,
    /// Items per page, clamped to the configured maximum.
    pub page_size: Option<i64>,
    /// Comma separated `Field [asc|desc]` clauses.
    pub order_by: Option<String>,
    /// Comma separated field names to return.
    pub fields: Option<String>,
}

impl CompanyDtoParameters {
    /// The ordering to apply, falling back to the company name.
    #[must_use]
    pub fn order_by_or_default(&self) -> &str {
        self.order_by.as_deref().unwrap_or(DEFAULT_COMPANY_ORDER_BY)
    }
}

/// Filters, ordering and shaping for `GET /api/companies/{companyId}/employees`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct EmployeeDtoParameters {
    /// `Male` or `Female`, any case.
    pub gender: Option<String>,
    /// Substring of the employee number, first name or last name.
    pub q: Option<String>,
    /// Comma separated `Field [asc|desc]` clauses.
    pub order_by: Option<String>,
    /// Comma separated field names to return.
    pub fields: Option<String>,
}

impl EmployeeDtoParameters {
    /// The ordering to apply, falling back to the employee number.
    #[must_use]
    pub fn order_by_or_default(&self) -> &str {
        self.order_by.as_deref().unwrap_or(DEFAULT_EMPLOYEE_ORDER_BY)
    }
}

/// Trims a text filter, treating blank input as absent.
#[must_use]
pub fn normalize_filter(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}
