//! SQLite repository implementations.

mod company_repository;
mod employee_repository;

pub use company_repository::SqliteCompanyRepository;
pub use employee_repository::SqliteEmployeeRepository;

use chrono::NaiveDate;
use routine_core::{CompanyId, Employee, EmployeeId, Gender, Ordering, RoutineError, RoutineResult};
use sqlx::{FromRow, QueryBuilder, Sqlite, SqliteConnection};
use uuid::Uuid;

pub(crate) const EMPLOYEE_COLUMNS: &str =
    "id, company_id, employee_no, first_name, last_name, gender, date_of_birth";

/// Database row representation of an employee.
#[derive(Debug, FromRow)]
pub(crate) struct EmployeeRow {
    id: String,
    company_id: String,
    employee_no: String,
    first_name: String,
    last_name: String,
    gender: i64,
    date_of_birth: NaiveDate,
}

impl TryFrom<EmployeeRow> for Employee {
    type Error = RoutineError;

    fn try_from(row: EmployeeRow) -> Result<Self, Self::Error> {
        let gender = Gender::from_code(row.gender).ok_or_else(|| {
            RoutineError::Internal(format!("Invalid gender code in database: {}", row.gender))
        })?;

        Ok(Employee {
            id: EmployeeId::from(parse_uuid(&row.id)?),
            company_id: CompanyId::from(parse_uuid(&row.company_id)?),
            employee_no: row.employee_no,
            first_name: row.first_name,
            last_name: row.last_name,
            gender,
            date_of_birth: row.date_of_birth,
        })
    }
}

pub(crate) fn parse_uuid(value: &str) -> RoutineResult<Uuid> {
    Uuid::parse_str(value)
        .map_err(|e| RoutineError::Internal(format!("Invalid UUID in database: {}", e)))
}

/// Appends ` ORDER BY ...` unless the ordering is empty.
///
/// Columns come from validated mapping tables, never from request text.
pub(crate) fn push_order_by(builder: &mut QueryBuilder<'_, Sqlite>, ordering: &Ordering) {
    if !ordering.is_empty() {
        builder.push(" ORDER BY ").push(ordering.to_sql());
    }
}

pub(crate) async fn insert_employee(
    conn: &mut SqliteConnection,
    employee: &Employee,
) -> RoutineResult<()> {
    sqlx::query(
        r#"
        INSERT INTO employees (id, company_id, employee_no, first_name, last_name, gender, date_of_birth)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(employee.id.to_string())
    .bind(employee.company_id.to_string())
    .bind(&employee.employee_no)
    .bind(&employee.first_name)
    .bind(&employee.last_name)
    .bind(employee.gender.code())
    .bind(employee.date_of_birth)
    .execute(conn)
    .await?;

    Ok(())
}
