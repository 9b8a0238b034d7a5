//! Company service trait definition.

use crate::dto::{CompanyAddDto, CompanyDto, CompanyDtoParameters, ShapedResource};
use async_trait::async_trait;
use routine_core::{CompanyId, Interface, PagedList, RoutineResult};

/// Company service trait.
#[async_trait]
pub trait CompanyService: Interface + Send + Sync {
    /// Lists one page of companies, shaped to the requested fields.
    ///
    /// `orderBy` and `fields` are checked before any storage access.
    async fn list_companies(
        &self,
        parameters: &CompanyDtoParameters,
    ) -> RoutineResult<PagedList<ShapedResource<CompanyId>>>;

    /// Gets one company shaped to `fields`.
    async fn get_company(
        &self,
        id: CompanyId,
        fields: Option<&str>,
    ) -> RoutineResult<ShapedResource<CompanyId>>;

    /// Gets every listed company, ordered by name; fails unless all exist.
    async fn get_companies(&self, ids: &[CompanyId]) -> RoutineResult<Vec<CompanyDto>>;

    /// Creates a company with its initial employees.
    async fn create_company(&self, request: CompanyAddDto) -> RoutineResult<CompanyDto>;

    /// Creates several companies in one transaction.
    async fn create_companies(&self, requests: Vec<CompanyAddDto>)
        -> RoutineResult<Vec<CompanyDto>>;

    /// Deletes a company together with its employees.
    async fn delete_company(&self, id: CompanyId) -> RoutineResult<()>;

    /// Checks whether a company exists.
    async fn company_exists(&self, id: CompanyId) -> RoutineResult<bool>;
}
