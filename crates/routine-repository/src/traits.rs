//! Repository trait definitions.

use async_trait::async_trait;
use routine_core::{
    Company, CompanyId, Employee, EmployeeId, Gender, Interface, Ordering, PageRequest, PagedList,
    RoutineResult,
};

/// Filters and ordering for a company page query.
///
/// String filters are expected to be trimmed; `None` means unfiltered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompanyFilter {
    /// Exact company name.
    pub company_name: Option<String>,
    /// Substring of the name or the introduction.
    pub search_term: Option<String>,
    /// Storage ordering, primary key first.
    pub ordering: Ordering,
}

/// Filters and ordering for an employee list query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmployeeFilter {
    /// Only employees of this gender.
    pub gender: Option<Gender>,
    /// Substring of the employee number, first name or last name.
    pub q: Option<String>,
    /// Storage ordering, primary key first.
    pub ordering: Ordering,
}

/// Company repository trait.
#[async_trait]
pub trait CompanyRepository: Interface + Send + Sync {
    /// Counts the filtered companies and fetches one window of them.
    ///
    /// Both statements run in a single transaction so the total and the
    /// items describe the same snapshot.
    async fn find_page(
        &self,
        filter: &CompanyFilter,
        page: PageRequest,
    ) -> RoutineResult<PagedList<Company>>;

    /// Finds a company by ID.
    async fn find_by_id(&self, id: CompanyId) -> RoutineResult<Option<Company>>;

    /// Finds every listed company that exists, ordered by name.
    async fn find_by_ids(&self, ids: &[CompanyId]) -> RoutineResult<Vec<Company>>;

    /// Checks whether a company exists.
    async fn exists(&self, id: CompanyId) -> RoutineResult<bool>;

    /// Inserts a company together with its initial employees.
    async fn save(&self, company: &Company, employees: &[Employee]) -> RoutineResult<()>;

    /// Inserts several companies with their employees, all or nothing.
    async fn save_all(&self, companies: &[(Company, Vec<Employee>)]) -> RoutineResult<()>;

    /// Deletes a company and, by cascade, its employees.
    async fn delete(&self, id: CompanyId) -> RoutineResult<bool>;
}

/// Employee repository trait.
///
/// Every lookup is scoped to the owning company.
#[async_trait]
pub trait EmployeeRepository: Interface + Send + Sync {
    /// Lists the filtered employees of a company.
    async fn find_all(
        &self,
        company_id: CompanyId,
        filter: &EmployeeFilter,
    ) -> RoutineResult<Vec<Employee>>;

    /// Finds one employee of a company.
    async fn find_by_id(
        &self,
        company_id: CompanyId,
        employee_id: EmployeeId,
    ) -> RoutineResult<Option<Employee>>;

    /// Inserts an employee.
    async fn save(&self, employee: &Employee) -> RoutineResult<()>;

    /// Overwrites an employee. Returns false when no row matched.
    async fn update(&self, employee: &Employee) -> RoutineResult<bool>;

    /// Deletes an employee. Returns false when no row matched.
    async fn delete(&self, company_id: CompanyId, employee_id: EmployeeId) -> RoutineResult<bool>;
}
