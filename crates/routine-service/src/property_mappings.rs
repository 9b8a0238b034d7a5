//! Hand-authored mapping tables from exposed DTO fields to storage columns.
//!
//! Built once at startup into a [`PropertyMappingRegistry`] that is shared
//! read-only by every request.

use crate::dto::{CompanyDto, EmployeeDto};
use routine_core::{Company, Employee, PropertyMapping, PropertyMappingRegistry, RoutineResult};

/// `CompanyDto` onto the `companies` table.
pub fn company_mapping() -> RoutineResult<PropertyMapping> {
    PropertyMapping::builder()
        .map("Id", ["id"])
        .map("CompanyName", ["name"])
        .map("Country", ["country"])
        .map("Industry", ["industry"])
        .map("Product", ["product"])
        .map("Introduction", ["introduction"])
        .build()
}

/// `EmployeeDto` onto the `employees` table.
///
/// `Name` sorts by first then last name; `Age` runs opposite to the birth date.
pub fn employee_mapping() -> RoutineResult<PropertyMapping> {
    PropertyMapping::builder()
        .map("Id", ["id"])
        .map("CompanyId", ["company_id"])
        .map("EmployeeNo", ["employee_no"])
        .map("Name", ["first_name", "last_name"])
        .map("GenderDisplay", ["gender"])
        .map_inverted("Age", ["date_of_birth"])
        .build()
}

/// Builds the registry holding every DTO to entity table.
pub fn build_registry() -> RoutineResult<PropertyMappingRegistry> {
    let mut registry = PropertyMappingRegistry::new();
    registry.register::<CompanyDto, Company>(company_mapping()?)?;
    registry.register::<EmployeeDto, Employee>(employee_mapping()?)?;
    Ok(registry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use routine_core::{apply_sort, Ordering, Shape, SortDirection, SortKey};

    fn key(column: &'static str, direction: SortDirection) -> SortKey {
        SortKey { column, direction }
    }

    #[test]
    fn test_registry_holds_both_tables() {
        let registry = build_registry().unwrap();
        assert_eq!(registry.len(), 2);
        assert!(registry.get_mapping::<CompanyDto, Company>().is_ok());
        assert!(registry.get_mapping::<EmployeeDto, Employee>().is_ok());
        assert!(registry.get_mapping::<CompanyDto, Employee>().is_err());
    }

    #[test]
    fn test_every_shape_field_is_sortable() {
        let companies = company_mapping().unwrap();
        assert!(CompanyDto::fields().iter().all(|f| companies.contains(f.name)));

        let employees = employee_mapping().unwrap();
        assert!(EmployeeDto::fields().iter().all(|f| employees.contains(f.name)));
    }

    #[test]
    fn test_name_desc_then_age() {
        let ordering = apply_sort(Ordering::new(), "name desc,age", &employee_mapping().unwrap())
            .unwrap();
        assert_eq!(
            ordering.keys(),
            &[
                key("first_name", SortDirection::Descending),
                key("last_name", SortDirection::Descending),
                key("date_of_birth", SortDirection::Descending),
            ]
        );
    }

    #[test]
    fn test_age_desc_sorts_birth_date_ascending() {
        let ordering =
            apply_sort(Ordering::new(), "Age desc", &employee_mapping().unwrap()).unwrap();
        assert_eq!(ordering.to_sql(), "date_of_birth ASC");
    }

    #[test]
    fn test_unknown_order_by_is_rejected() {
        let registry = build_registry().unwrap();
        assert!(!registry
            .valid_mapping_exists_for::<CompanyDto, Company>("unknownfield")
            .unwrap());
        assert!(registry
            .valid_mapping_exists_for::<CompanyDto, Company>("companyName desc, country")
            .unwrap());
    }
}
