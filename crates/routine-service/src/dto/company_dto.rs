//! Company DTOs.

use super::EmployeeAddDto;
use routine_core::rules::not_blank;
use routine_core::{CompanyId, Shape, ShapeField};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;
use validator::Validate;

/// Company as exposed by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "PascalCase")]
pub struct CompanyDto {
    pub id: CompanyId,
    pub company_name: String,
    pub country: String,
    pub industry: String,
    pub product: String,
    pub introduction: String,
}

static COMPANY_DTO_FIELDS: [ShapeField<CompanyDto>; 6] = [
    ShapeField::new("Id", |c: &CompanyDto| Value::String(c.id.to_string())),
    ShapeField::new("CompanyName", |c: &CompanyDto| Value::from(c.company_name.as_str())),
    ShapeField::new("Country", |c: &CompanyDto| Value::from(c.country.as_str())),
    ShapeField::new("Industry", |c: &CompanyDto| Value::from(c.industry.as_str())),
    ShapeField::new("Product", |c: &CompanyDto| Value::from(c.product.as_str())),
    ShapeField::new("Introduction", |c: &CompanyDto| Value::from(c.introduction.as_str())),
];

impl Shape for CompanyDto {
    fn fields() -> &'static [ShapeField<Self>] {
        &COMPANY_DTO_FIELDS
    }
}

/// Request to create a company, optionally with its first employees.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct CompanyAddDto {
    #[serde(rename = "Name", alias = "name")]
    #[validate(
        length(max = 100, message = "Name cannot exceed 100 characters"),
        custom(function = "not_blank", message = "Name is required")
    )]
    pub name: String,

    #[serde(rename = "Introduction", alias = "introduction", default)]
    #[validate(length(max = 500, message = "Introduction cannot exceed 500 characters"))]
    pub introduction: String,

    #[serde(rename = "Country", alias = "country", default)]
    #[validate(length(max = 50))]
    pub country: String,

    #[serde(rename = "Industry", alias = "industry", default)]
    #[validate(length(max = 50))]
    pub industry: String,

    #[serde(rename = "Product", alias = "product", default)]
    #[validate(length(max = 50))]
    pub product: String,

    #[serde(rename = "Employees", alias = "employees", default)]
    #[validate(nested)]
    pub employees: Vec<EmployeeAddDto>,
}
