//! SQLite employee repository implementation.

use super::{insert_employee, push_order_by, EmployeeRow, EMPLOYEE_COLUMNS};
use crate::{traits::EmployeeRepository, DatabasePoolInterface, EmployeeFilter};
use async_trait::async_trait;
use routine_core::{CompanyId, Employee, EmployeeId, RoutineResult};
use shaku::Component;
use sqlx::{QueryBuilder, Sqlite};
use std::sync::Arc;
use tracing::{debug, info};

/// SQLite employee repository implementation.
#[derive(Component, Clone)]
#[shaku(interface = EmployeeRepository)]
pub struct SqliteEmployeeRepository {
    #[shaku(inject)]
    pool: Arc<dyn DatabasePoolInterface>,
}

impl SqliteEmployeeRepository {
    /// Creates a new SQLite employee repository.
    #[must_use]
    pub fn new(pool: Arc<dyn DatabasePoolInterface>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EmployeeRepository for SqliteEmployeeRepository {
    async fn find_all(
        &self,
        company_id: CompanyId,
        filter: &EmployeeFilter,
    ) -> RoutineResult<Vec<Employee>> {
        debug!(
            "Finding employees of company {}, gender: {:?}, q: {:?}",
            company_id, filter.gender, filter.q
        );

        let mut builder = QueryBuilder::<Sqlite>::new(format!(
            "SELECT {} FROM employees WHERE company_id = ",
            EMPLOYEE_COLUMNS
        ));
        builder.push_bind(company_id.to_string());

        if let Some(gender) = filter.gender {
            builder.push(" AND gender = ").push_bind(gender.code());
        }

        if let Some(q) = &filter.q {
            builder
                .push(" AND (instr(employee_no, ")
                .push_bind(q.clone())
                .push(") > 0 OR instr(first_name, ")
                .push_bind(q.clone())
                .push(") > 0 OR instr(last_name, ")
                .push_bind(q.clone())
                .push(") > 0)");
        }

        push_order_by(&mut builder, &filter.ordering);

        let rows: Vec<EmployeeRow> = builder
            .build_query_as()
            .fetch_all(self.pool.inner())
            .await?;

        rows.into_iter().map(Employee::try_from).collect()
    }

    async fn find_by_id(
        &self,
        company_id: CompanyId,
        employee_id: EmployeeId,
    ) -> RoutineResult<Option<Employee>> {
        debug!("Finding employee {} of company {}", employee_id, company_id);

        let row = sqlx::query_as::<_, EmployeeRow>(&format!(
            "SELECT {} FROM employees WHERE company_id = ? AND id = ?",
            EMPLOYEE_COLUMNS
        ))
        .bind(company_id.to_string())
        .bind(employee_id.to_string())
        .fetch_optional(self.pool.inner())
        .await?;

        row.map(Employee::try_from).transpose()
    }

    async fn save(&self, employee: &Employee) -> RoutineResult<()> {
        info!(
            "Saving employee {} for company {}",
            employee.employee_no, employee.company_id
        );

        let mut conn = self.pool.inner().acquire().await?;
        insert_employee(&mut conn, employee).await
    }

    async fn update(&self, employee: &Employee) -> RoutineResult<bool> {
        info!("Updating employee: {}", employee.id);

        let result = sqlx::query(
            r#"
            UPDATE employees
            SET employee_no = ?, first_name = ?, last_name = ?, gender = ?, date_of_birth = ?
            WHERE id = ? AND company_id = ?
            "#,
        )
        .bind(&employee.employee_no)
        .bind(&employee.first_name)
        .bind(&employee.last_name)
        .bind(employee.gender.code())
        .bind(employee.date_of_birth)
        .bind(employee.id.to_string())
        .bind(employee.company_id.to_string())
        .execute(self.pool.inner())
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, company_id: CompanyId, employee_id: EmployeeId) -> RoutineResult<bool> {
        info!("Deleting employee {} of company {}", employee_id, company_id);

        let result = sqlx::query("DELETE FROM employees WHERE id = ? AND company_id = ?")
            .bind(employee_id.to_string())
            .bind(company_id.to_string())
            .execute(self.pool.inner())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

impl std::fmt::Debug for SqliteEmployeeRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteEmployeeRepository").finish_non_exhaustive()
    }
}
