//! Employee service trait definition.

use crate::dto::{
    EmployeeAddDto, EmployeeDto, EmployeeDtoParameters, EmployeeUpdateDto, ShapedResource,
};
use async_trait::async_trait;
use routine_core::{CompanyId, EmployeeId, Interface, RoutineResult};

/// Employee service trait.
///
/// Every operation fails with not-found when the company does not exist.
#[async_trait]
pub trait EmployeeService: Interface + Send + Sync {
    /// Lists the employees of a company, shaped to the requested fields.
    async fn list_employees(
        &self,
        company_id: CompanyId,
        parameters: &EmployeeDtoParameters,
    ) -> RoutineResult<Vec<ShapedResource<EmployeeId>>>;

    /// Gets one employee shaped to `fields`.
    async fn get_employee(
        &self,
        company_id: CompanyId,
        employee_id: EmployeeId,
        fields: Option<&str>,
    ) -> RoutineResult<ShapedResource<EmployeeId>>;

    /// Hires an employee.
    async fn create_employee(
        &self,
        company_id: CompanyId,
        request: EmployeeAddDto,
    ) -> RoutineResult<EmployeeDto>;

    /// Replaces every field of an employee.
    async fn update_employee(
        &self,
        company_id: CompanyId,
        employee_id: EmployeeId,
        request: EmployeeUpdateDto,
    ) -> RoutineResult<()>;

    /// Removes an employee.
    async fn delete_employee(
        &self,
        company_id: CompanyId,
        employee_id: EmployeeId,
    ) -> RoutineResult<()>;
}
