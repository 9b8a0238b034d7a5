//! SQLite company repository implementation.

use super::{insert_employee, parse_uuid, push_order_by};
use crate::{traits::CompanyRepository, CompanyFilter, DatabasePoolInterface};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use routine_core::{
    Company, CompanyId, Employee, PageRequest, PagedList, RoutineError, RoutineResult,
};
use shaku::Component;
use sqlx::{FromRow, QueryBuilder, Sqlite, SqliteConnection};
use std::sync::Arc;
use tracing::{debug, info};

const COMPANY_COLUMNS: &str =
    "id, name, country, industry, product, introduction, bankrupt_time";

/// SQLite company repository implementation.
#[derive(Component, Clone)]
#[shaku(interface = CompanyRepository)]
pub struct SqliteCompanyRepository {
    #[shaku(inject)]
    pool: Arc<dyn DatabasePoolInterface>,
}

impl SqliteCompanyRepository {
    /// Creates a new SQLite company repository.
    #[must_use]
    pub fn new(pool: Arc<dyn DatabasePoolInterface>) -> Self {
        Self { pool }
    }
}

/// Database row representation of a company.
#[derive(Debug, FromRow)]
struct CompanyRow {
    id: String, // UUID stored as TEXT
    name: String,
    country: String,
    industry: String,
    product: String,
    introduction: String,
    bankrupt_time: Option<DateTime<Utc>>,
}

impl TryFrom<CompanyRow> for Company {
    type Error = RoutineError;

    fn try_from(row: CompanyRow) -> Result<Self, Self::Error> {
        Ok(Company {
            id: CompanyId::from(parse_uuid(&row.id)?),
            name: row.name,
            country: row.country,
            industry: row.industry,
            product: row.product,
            introduction: row.introduction,
            bankrupt_time: row.bankrupt_time,
        })
    }
}

fn push_filters(builder: &mut QueryBuilder<'_, Sqlite>, filter: &CompanyFilter) {
    let mut keyword = " WHERE ";

    if let Some(name) = &filter.company_name {
        builder.push(keyword).push("name = ").push_bind(name.clone());
        keyword = " AND ";
    }

    if let Some(term) = &filter.search_term {
        builder
            .push(keyword)
            .push("(instr(name, ")
            .push_bind(term.clone())
            .push(") > 0 OR instr(introduction, ")
            .push_bind(term.clone())
            .push(") > 0)");
    }
}

async fn insert_company(
    conn: &mut SqliteConnection,
    company: &Company,
    employees: &[Employee],
) -> RoutineResult<()> {
    sqlx::query(
        r#"
        INSERT INTO companies (id, name, country, industry, product, introduction, bankrupt_time)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(company.id.to_string())
    .bind(&company.name)
    .bind(&company.country)
    .bind(&company.industry)
    .bind(&company.product)
    .bind(&company.introduction)
    .bind(company.bankrupt_time)
    .execute(&mut *conn)
    .await?;

    for employee in employees {
        insert_employee(&mut *conn, employee).await?;
    }

    Ok(())
}

fn to_i64(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

#[async_trait]
impl CompanyRepository for SqliteCompanyRepository {
    async fn find_page(
        &self,
        filter: &CompanyFilter,
        page: PageRequest,
    ) -> RoutineResult<PagedList<Company>> {
        debug!(
            "Finding companies, page: {}, size: {}, order: {}",
            page.page_number,
            page.page_size,
            filter.ordering.to_sql()
        );

        let mut tx = self.pool.inner().begin().await?;

        let mut count = QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM companies");
        push_filters(&mut count, filter);
        let total: i64 = count.build_query_scalar().fetch_one(&mut *tx).await?;

        let mut select =
            QueryBuilder::<Sqlite>::new(format!("SELECT {} FROM companies", COMPANY_COLUMNS));
        push_filters(&mut select, filter);
        push_order_by(&mut select, &filter.ordering);
        select
            .push(" LIMIT ")
            .push_bind(to_i64(page.limit()))
            .push(" OFFSET ")
            .push_bind(to_i64(page.offset()));
        let rows: Vec<CompanyRow> = select.build_query_as().fetch_all(&mut *tx).await?;

        tx.commit().await?;

        let companies = rows
            .into_iter()
            .map(Company::try_from)
            .collect::<RoutineResult<Vec<_>>>()?;

        Ok(PagedList::new(
            companies,
            u64::try_from(total).unwrap_or_default(),
            page,
        ))
    }

    async fn find_by_id(&self, id: CompanyId) -> RoutineResult<Option<Company>> {
        debug!("Finding company by id: {}", id);

        let row = sqlx::query_as::<_, CompanyRow>(&format!(
            "SELECT {} FROM companies WHERE id = ?",
            COMPANY_COLUMNS
        ))
        .bind(id.to_string())
        .fetch_optional(self.pool.inner())
        .await?;

        row.map(Company::try_from).transpose()
    }

    async fn find_by_ids(&self, ids: &[CompanyId]) -> RoutineResult<Vec<Company>> {
        debug!("Finding {} companies by id", ids.len());

        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut builder = QueryBuilder::<Sqlite>::new(format!(
            "SELECT {} FROM companies WHERE id IN (",
            COMPANY_COLUMNS
        ));
        let mut separated = builder.separated(", ");
        for id in ids {
            separated.push_bind(id.to_string());
        }
        separated.push_unseparated(") ORDER BY name ASC, id ASC");

        let rows: Vec<CompanyRow> = builder
            .build_query_as()
            .fetch_all(self.pool.inner())
            .await?;

        rows.into_iter().map(Company::try_from).collect()
    }

    async fn exists(&self, id: CompanyId) -> RoutineResult<bool> {
        let result: Option<i32> = sqlx::query_scalar("SELECT 1 FROM companies WHERE id = ? LIMIT 1")
            .bind(id.to_string())
            .fetch_optional(self.pool.inner())
            .await?;

        Ok(result.is_some())
    }

    async fn save(&self, company: &Company, employees: &[Employee]) -> RoutineResult<()> {
        info!(
            "Saving company {} ({}) with {} employees",
            company.name,
            company.id,
            employees.len()
        );

        let mut tx = self.pool.inner().begin().await?;
        insert_company(&mut tx, company, employees).await?;
        tx.commit().await?;

        Ok(())
    }

    async fn save_all(&self, companies: &[(Company, Vec<Employee>)]) -> RoutineResult<()> {
        info!("Saving {} companies", companies.len());

        let mut tx = self.pool.inner().begin().await?;
        for (company, employees) in companies {
            insert_company(&mut tx, company, employees).await?;
        }
        tx.commit().await?;

        Ok(())
    }

    async fn delete(&self, id: CompanyId) -> RoutineResult<bool> {
        info!("Deleting company: {}", id);

        let result = sqlx::query("DELETE FROM companies WHERE id = ?")
            .bind(id.to_string())
            .execute(self.pool.inner())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

impl std::fmt::Debug for SqliteCompanyRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteCompanyRepository").finish_non_exhaustive()
    }
}
