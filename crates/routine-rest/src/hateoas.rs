//! Hypermedia links attached to companies, employees and their collections.
//!
//! Every href is absolute and built from the request base URL, so the
//! builder is a pure function of that base and the query that produced the
//! response.

use routine_core::{CompanyId, EmployeeId, PaginationMetadata, RoutineResult, ShapedRecord};
use routine_service::{CompanyDtoParameters, EmployeeDtoParameters};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::Url;
use utoipa::ToSchema;

/// A related action the client may follow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Link {
    pub href: String,
    pub rel: String,
    pub method: String,
}

impl Link {
    fn new(href: String, rel: &str, method: &str) -> Self {
        Self {
            href,
            rel: rel.to_string(),
            method: method.to_string(),
        }
    }
}

/// Collection envelope: the linked items plus links for the collection itself.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LinkedCollection {
    #[schema(value_type = Vec<Object>)]
    pub value: Vec<Value>,
    pub links: Vec<Link>,
}

/// Adds a `links` entry to a shaped record.
pub fn with_links(mut record: ShapedRecord, links: Vec<Link>) -> RoutineResult<Value> {
    record.insert("links", serde_json::to_value(links)?);
    Ok(Value::from(record))
}

/// Builds absolute resource URLs below one base.
#[derive(Debug, Clone)]
pub struct LinkBuilder {
    base: Url,
}

impl LinkBuilder {
    /// Creates a builder for `base`, e.g. `https://api.example.com/`.
    #[must_use]
    pub fn new(base: Url) -> Self {
        Self { base }
    }

    fn url(&self, segments: &[&str], query: &[(&str, String)]) -> String {
        let mut url = self.base.clone();
        url.set_query(None);
        url.set_fragment(None);
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        if !query.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(query.iter().map(|(key, value)| (*key, value.as_str())));
        }
        url.into()
    }

    /// `/api/companies/{companyId}`.
    #[must_use]
    pub fn company_url(&self, company_id: CompanyId) -> String {
        self.url(&["api", "companies", &company_id.to_string()], &[])
    }

    /// `/api/companycollections/({id},...)`.
    #[must_use]
    pub fn company_collection_url(&self, ids: &[CompanyId]) -> String {
        let ids = ids
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",");
        self.url(&["api", "companycollections", &format!("({})", ids)], &[])
    }

    /// `/api/companies/{companyId}/employees/{employeeId}`.
    #[must_use]
    pub fn employee_url(&self, company_id: CompanyId, employee_id: EmployeeId) -> String {
        self.url(
            &[
                "api",
                "companies",
                &company_id.to_string(),
                "employees",
                &employee_id.to_string(),
            ],
            &[],
        )
    }

    /// Links for one company; `self` keeps the requested `fields`.
    #[must_use]
    pub fn company_links(&self, company_id: CompanyId, fields: Option<&str>) -> Vec<Link> {
        let id = company_id.to_string();
        let company = ["api", "companies", id.as_str()];
        let employees = ["api", "companies", id.as_str(), "employees"];

        vec![
            Link::new(self.url(&company, &fields_query(fields)), "self", "GET"),
            Link::new(self.url(&company, &[]), "delete_company", "DELETE"),
            Link::new(
                self.url(&employees, &[]),
                "create_employee_for_company",
                "POST",
            ),
            Link::new(self.url(&employees, &[]), "employees", "GET"),
        ]
    }

    /// Links for one employee; `self` keeps the requested `fields`.
    #[must_use]
    pub fn employee_links(
        &self,
        company_id: CompanyId,
        employee_id: EmployeeId,
        fields: Option<&str>,
    ) -> Vec<Link> {
        let company_id = company_id.to_string();
        let employee_id = employee_id.to_string();
        let employee = [
            "api",
            "companies",
            company_id.as_str(),
            "employees",
            employee_id.as_str(),
        ];

        vec![
            Link::new(self.url(&employee, &fields_query(fields)), "self", "GET"),
            Link::new(self.url(&employee, &[]), "update_employee", "PUT"),
            Link::new(self.url(&employee, &[]), "delete_employee", "DELETE"),
        ]
    }

    /// `self`, `previous_page` and `next_page` for one page of companies.
    ///
    /// All three repeat the effective query and differ only in `pageNumber`.
    #[must_use]
    pub fn company_page_links(
        &self,
        parameters: &CompanyDtoParameters,
        page: &PaginationMetadata,
    ) -> Vec<Link> {
        let page_url = |page_number: u32| {
            self.url(
                &["api", "companies"],
                &company_page_query(parameters, page_number, page.page_size),
            )
        };

        let mut links = vec![Link::new(page_url(page.current_page), "self", "GET")];
        if page.current_page > 1 {
            links.push(Link::new(
                page_url(page.current_page - 1),
                "previous_page",
                "GET",
            ));
        }
        if u64::from(page.current_page) < page.total_pages {
            links.push(Link::new(
                page_url(page.current_page + 1),
                "next_page",
                "GET",
            ));
        }
        links
    }

    /// `self` for the employee list of a company.
    #[must_use]
    pub fn employee_list_links(
        &self,
        company_id: CompanyId,
        parameters: &EmployeeDtoParameters,
    ) -> Vec<Link> {
        let company_id = company_id.to_string();
        let mut query = Vec::new();
        push_text(&mut query, "fields", parameters.fields.as_deref());
        query.push(("orderBy", parameters.order_by_or_default().to_string()));
        push_text(&mut query, "gender", parameters.gender.as_deref());
        push_text(&mut query, "q", parameters.q.as_deref());

        vec![Link::new(
            self.url(&["api", "companies", &company_id, "employees"], &query),
            "self",
            "GET",
        )]
    }
}

fn fields_query(fields: Option<&str>) -> Vec<(&'static str, String)> {
    let mut query = Vec::new();
    push_text(&mut query, "fields", fields);
    query
}

fn company_page_query(
    parameters: &CompanyDtoParameters,
    page_number: u32,
    page_size: u32,
) -> Vec<(&'static str, String)> {
    let mut query = Vec::new();
    push_text(&mut query, "fields", parameters.fields.as_deref());
    query.push(("orderBy", parameters.order_by_or_default().to_string()));
    query.push(("pageNumber", page_number.to_string()));
    query.push(("pageSize", page_size.to_string()));
    push_text(&mut query, "companyName", parameters.company_name.as_deref());
    push_text(&mut query, "searchTerm", parameters.search_term.as_deref());
    query
}

fn push_text(query: &mut Vec<(&'static str, String)>, key: &'static str, value: Option<&str>) {
    if let Some(value) = value.map(str::trim).filter(|value| !value.is_empty()) {
        query.push((key, value.to_string()));
    }
}
