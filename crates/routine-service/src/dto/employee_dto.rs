//! Employee DTOs.

use chrono::NaiveDate;
use routine_core::{CompanyId, EmployeeId, Gender, Shape, ShapeField};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::borrow::Cow;
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

/// Employee as exposed by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "PascalCase")]
pub struct EmployeeDto {
    pub id: EmployeeId,
    pub company_id: CompanyId,
    pub employee_no: String,
    /// First and last name joined by a space.
    pub name: String,
    pub gender_display: String,
    /// Whole calendar years since the year of birth.
    pub age: i32,
}

static EMPLOYEE_DTO_FIELDS: [ShapeField<EmployeeDto>; 6] = [
    ShapeField::new("Id", |e: &EmployeeDto| Value::String(e.id.to_string())),
    ShapeField::new("CompanyId", |e: &EmployeeDto| Value::String(e.company_id.to_string())),
    ShapeField::new("EmployeeNo", |e: &EmployeeDto| Value::from(e.employee_no.as_str())),
    ShapeField::new("Name", |e: &EmployeeDto| Value::from(e.name.as_str())),
    ShapeField::new("GenderDisplay", |e: &EmployeeDto| Value::from(e.gender_display.as_str())),
    ShapeField::new("Age", |e: &EmployeeDto| Value::from(e.age)),
];

impl Shape for EmployeeDto {
    fn fields() -> &'static [ShapeField<Self>] {
        &EMPLOYEE_DTO_FIELDS
    }
}

/// Request body for creating or fully replacing an employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
#[validate(schema(function = "validate_employee_names"))]
pub struct EmployeeAddDto {
    #[serde(rename = "EmployeeNo", alias = "employeeNo")]
    #[validate(length(equal = 10, message = "EmployeeNo must be exactly 10 characters"))]
    pub employee_no: String,

    #[serde(rename = "FirstName", alias = "firstName")]
    #[validate(length(min = 1, max = 50, message = "FirstName must be 1-50 characters"))]
    pub first_name: String,

    #[serde(rename = "LastName", alias = "lastName")]
    #[validate(length(min = 1, max = 50, message = "LastName must be 1-50 characters"))]
    pub last_name: String,

    #[serde(rename = "Gender", alias = "gender")]
    pub gender: Gender,

    #[serde(rename = "DateOfBirth", alias = "dateOfBirth")]
    pub date_of_birth: NaiveDate,
}

/// Full replacement of an employee; same shape and rules as creation.
pub type EmployeeUpdateDto = EmployeeAddDto;

fn validate_employee_names(dto: &EmployeeAddDto) -> Result<(), ValidationError> {
    if dto.employee_no == dto.first_name {
        return Err(ValidationError::new("employee_no_equals_first_name").with_message(
            Cow::Borrowed("EmployeeNo and FirstName must be different"),
        ));
    }
    if dto.first_name == dto.last_name {
        return Err(ValidationError::new("first_name_equals_last_name")
            .with_message(Cow::Borrowed("FirstName and LastName must be different")));
    }
    Ok(())
}
