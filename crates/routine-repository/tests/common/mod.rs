//! Common test infrastructure for database integration tests.

#![allow(dead_code)]

use chrono::NaiveDate;
use routine_core::{Company, CompanyId, Employee, Gender};
use routine_repository::{DatabasePool, DatabasePoolInterface};
use std::sync::Arc;

/// Microsoft in the seed data.
pub const MICROSOFT_ID: &str = "bbdee09c-089b-4d30-bece-44df5923716c";
/// Google in the seed data.
pub const GOOGLE_ID: &str = "6fb600c1-9011-4fd7-9234-881379716440";

/// Test database wrapper.
///
/// Each instance owns a private in-memory SQLite database with the
/// migrations applied.
pub struct TestDatabase {
    pool: Arc<DatabasePool>,
}

impl TestDatabase {
    /// Creates an empty migrated database.
    pub async fn new() -> Self {
        let pool = DatabasePool::in_memory()
            .await
            .expect("Failed to open in-memory database");
        Self {
            pool: Arc::new(pool),
        }
    }

    /// Creates a database holding the demo data set.
    pub async fn seeded() -> Self {
        let db = Self::new().await;
        db.pool.seed().await.expect("Failed to seed database");
        db
    }

    /// Returns a reference to the database pool.
    pub fn pool(&self) -> Arc<DatabasePool> {
        Arc::clone(&self.pool)
    }
}

pub fn company(name: &str) -> Company {
    Company::new(
        name.to_string(),
        "USA".to_string(),
        "Software".to_string(),
        "Software".to_string(),
        format!("{} introduction", name),
    )
}

pub fn employee(company_id: CompanyId, employee_no: &str, first_name: &str, born: i32) -> Employee {
    Employee::new(
        company_id,
        employee_no.to_string(),
        first_name.to_string(),
        "Tester".to_string(),
        Gender::Male,
        NaiveDate::from_ymd_opt(born, 1, 1).expect("valid date"),
    )
}
