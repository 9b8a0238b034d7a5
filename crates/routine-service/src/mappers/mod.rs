//! Entity-DTO mappers.

use crate::dto::{CompanyAddDto, CompanyDto, EmployeeAddDto, EmployeeDto};
use chrono::{NaiveDate, Utc};
use routine_core::{Company, CompanyId, Employee};

impl From<&Company> for CompanyDto {
    fn from(company: &Company) -> Self {
        Self {
            id: company.id,
            company_name: company.name.clone(),
            country: company.country.clone(),
            industry: company.industry.clone(),
            product: company.product.clone(),
            introduction: company.introduction.clone(),
        }
    }
}

impl From<Company> for CompanyDto {
    fn from(company: Company) -> Self {
        Self {
            id: company.id,
            company_name: company.name,
            country: company.country,
            industry: company.industry,
            product: company.product,
            introduction: company.introduction,
        }
    }
}

impl EmployeeDto {
    /// Maps an employee, computing the age as of `today`.
    #[must_use]
    pub fn from_employee(employee: &Employee, today: NaiveDate) -> Self {
        Self {
            id: employee.id,
            company_id: employee.company_id,
            employee_no: employee.employee_no.clone(),
            name: employee.full_name(),
            gender_display: employee.gender.to_string(),
            age: employee.age_on(today),
        }
    }
}

impl From<&Employee> for EmployeeDto {
    fn from(employee: &Employee) -> Self {
        Self::from_employee(employee, Utc::now().date_naive())
    }
}

impl EmployeeAddDto {
    /// Builds a new employee of `company_id` with a fresh id.
    #[must_use]
    pub fn into_employee(self, company_id: CompanyId) -> Employee {
        Employee::new(
            company_id,
            self.employee_no,
            self.first_name,
            self.last_name,
            self.gender,
            self.date_of_birth,
        )
    }

    /// Copies every field onto an existing employee, keeping its ids.
    pub fn apply_to(self, employee: &mut Employee) {
        employee.employee_no = self.employee_no;
        employee.first_name = self.first_name;
        employee.last_name = self.last_name;
        employee.gender = self.gender;
        employee.date_of_birth = self.date_of_birth;
    }
}

impl CompanyAddDto {
    /// Builds a new company and its initial employees.
    #[must_use]
    pub fn into_entities(self) -> (Company, Vec<Employee>) {
        let company = Company::new(
            self.name.trim().to_string(),
            self.country,
            self.industry,
            self.product,
            self.introduction,
        );
        let employees = self
            .employees
            .into_iter()
            .map(|employee| employee.into_employee(company.id))
            .collect();
        (company, employees)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use routine_core::Gender;

    fn grace() -> EmployeeAddDto {
        EmployeeAddDto {
            employee_no: "MSFT000777".to_string(),
            first_name: "Grace".to_string(),
            last_name: "Hopper".to_string(),
            gender: Gender::Female,
            date_of_birth: NaiveDate::from_ymd_opt(1906, 12, 9).unwrap(),
        }
    }

    #[test]
    fn test_employee_dto_mapping() {
        let employee = grace().into_employee(CompanyId::new());
        let dto = EmployeeDto::from_employee(&employee, NaiveDate::from_ymd_opt(2000, 1, 1).unwrap());

        assert_eq!(dto.name, "Grace Hopper");
        assert_eq!(dto.gender_display, "Female");
        assert_eq!(dto.age, 94);
        assert_eq!(dto.company_id, employee.company_id);
    }

    #[test]
    fn test_company_add_dto_links_employees_to_new_company() {
        let dto = CompanyAddDto {
            name: " Acme ".to_string(),
            employees: vec![grace()],
            ..CompanyAddDto::default()
        };
        let (company, employees) = dto.into_entities();

        assert_eq!(company.name, "Acme");
        assert_eq!(employees.len(), 1);
        assert_eq!(employees[0].company_id, company.id);

        let mapped = CompanyDto::from(&company);
        assert_eq!(mapped.company_name, "Acme");
        assert_eq!(mapped.id, company.id);
    }

    #[test]
    fn test_apply_to_keeps_ids() {
        let mut employee = grace().into_employee(CompanyId::new());
        let id = employee.id;
        let mut update = grace();
        update.first_name = "Ada".to_string();
        update.apply_to(&mut employee);

        assert_eq!(employee.id, id);
        assert_eq!(employee.first_name, "Ada");
    }
}
