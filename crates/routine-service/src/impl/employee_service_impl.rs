//! Employee service implementation.

use super::{ordering_for, selection_for};
use crate::dto::{
    normalize_filter, EmployeeAddDto, EmployeeDto, EmployeeDtoParameters, EmployeeUpdateDto,
    ShapedResource,
};
use crate::employee_service::EmployeeService;
use async_trait::async_trait;
use chrono::Utc;
use routine_core::{
    CompanyId, Employee, EmployeeId, Gender, PropertyMappingRegistry, RoutineError,
    RoutineResult, ValidateExt,
};
use routine_repository::{CompanyRepository, EmployeeFilter, EmployeeRepository};
use shaku::Component;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Employee service component for Shaku DI.
#[derive(Component)]
#[shaku(interface = EmployeeService)]
pub struct EmployeeServiceImpl {
    #[shaku(inject)]
    company_repository: Arc<dyn CompanyRepository>,
    #[shaku(inject)]
    employee_repository: Arc<dyn EmployeeRepository>,
    mappings: Arc<PropertyMappingRegistry>,
}

impl EmployeeServiceImpl {
    /// Creates a new employee service.
    #[must_use]
    pub fn new(
        company_repository: Arc<dyn CompanyRepository>,
        employee_repository: Arc<dyn EmployeeRepository>,
        mappings: Arc<PropertyMappingRegistry>,
    ) -> Self {
        Self {
            company_repository,
            employee_repository,
            mappings,
        }
    }

    async fn ensure_company(&self, company_id: CompanyId) -> RoutineResult<()> {
        if self.company_repository.exists(company_id).await? {
            Ok(())
        } else {
            Err(RoutineError::not_found("Company", company_id))
        }
    }

    async fn find_employee(
        &self,
        company_id: CompanyId,
        employee_id: EmployeeId,
    ) -> RoutineResult<Employee> {
        self.ensure_company(company_id).await?;
        self.employee_repository
            .find_by_id(company_id, employee_id)
            .await?
            .ok_or_else(|| RoutineError::not_found("Employee", employee_id))
    }
}

fn parse_gender(gender: Option<&str>) -> RoutineResult<Option<Gender>> {
    normalize_filter(gender)
        .map(|gender| {
            gender.parse::<Gender>().map_err(|e| {
                warn!("Rejected gender filter: {}", e);
                RoutineError::invalid_query(e)
            })
        })
        .transpose()
}

#[async_trait]
impl EmployeeService for EmployeeServiceImpl {
    async fn list_employees(
        &self,
        company_id: CompanyId,
        parameters: &EmployeeDtoParameters,
    ) -> RoutineResult<Vec<ShapedResource<EmployeeId>>> {
        debug!("Listing employees of {}: {:?}", company_id, parameters);

        let ordering = ordering_for::<EmployeeDto, Employee>(
            &self.mappings,
            parameters.order_by_or_default(),
        )?;
        let fields = selection_for::<EmployeeDto>(parameters.fields.as_deref())?;
        let filter = EmployeeFilter {
            gender: parse_gender(parameters.gender.as_deref())?,
            q: normalize_filter(parameters.q.as_deref()),
            ordering,
        };

        self.ensure_company(company_id).await?;
        let employees = self
            .employee_repository
            .find_all(company_id, &filter)
            .await?;

        let today = Utc::now().date_naive();
        employees
            .iter()
            .map(|employee| {
                ShapedResource::shape(
                    employee.id,
                    &EmployeeDto::from_employee(employee, today),
                    &fields,
                )
            })
            .collect()
    }

    async fn get_employee(
        &self,
        company_id: CompanyId,
        employee_id: EmployeeId,
        fields: Option<&str>,
    ) -> RoutineResult<ShapedResource<EmployeeId>> {
        debug!("Getting employee {} of {}", employee_id, company_id);

        let fields = selection_for::<EmployeeDto>(fields)?;
        let employee = self.find_employee(company_id, employee_id).await?;

        ShapedResource::shape(employee_id, &EmployeeDto::from(&employee), &fields)
    }

    async fn create_employee(
        &self,
        company_id: CompanyId,
        request: EmployeeAddDto,
    ) -> RoutineResult<EmployeeDto> {
        debug!("Creating employee {} for {}", request.employee_no, company_id);

        request.validate_request()?;
        self.ensure_company(company_id).await?;

        let employee = request.into_employee(company_id);
        self.employee_repository.save(&employee).await?;

        info!("Employee created: {} ({})", employee.full_name(), employee.id);
        Ok(EmployeeDto::from(&employee))
    }

    async fn update_employee(
        &self,
        company_id: CompanyId,
        employee_id: EmployeeId,
        request: EmployeeUpdateDto,
    ) -> RoutineResult<()> {
        debug!("Updating employee {} of {}", employee_id, company_id);

        request.validate_request()?;
        let mut employee = self.find_employee(company_id, employee_id).await?;
        request.apply_to(&mut employee);

        // The row can disappear between the lookup and the write.
        if !self.employee_repository.update(&employee).await? {
            return Err(RoutineError::not_found("Employee", employee_id));
        }

        info!("Employee updated: {}", employee_id);
        Ok(())
    }

    async fn delete_employee(
        &self,
        company_id: CompanyId,
        employee_id: EmployeeId,
    ) -> RoutineResult<()> {
        debug!("Deleting employee {} of {}", employee_id, company_id);

        self.ensure_company(company_id).await?;
        if !self
            .employee_repository
            .delete(company_id, employee_id)
            .await?
        {
            return Err(RoutineError::not_found("Employee", employee_id));
        }

        info!("Employee deleted: {}", employee_id);
        Ok(())
    }
}

impl std::fmt::Debug for EmployeeServiceImpl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmployeeServiceImpl")
            .field("mappings", &self.mappings)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_gender() {
        assert_eq!(parse_gender(None).unwrap(), None);
        assert_eq!(parse_gender(Some("  ")).unwrap(), None);
        assert_eq!(parse_gender(Some("female")).unwrap(), Some(Gender::Female));
        assert_eq!(parse_gender(Some(" MALE ")).unwrap(), Some(Gender::Male));
        assert_eq!(
            parse_gender(Some("other")).unwrap_err().error_code(),
            "INVALID_QUERY"
        );
    }
}
