//! Services wired onto a seeded in-memory database.

#![allow(dead_code)]

use routine_config::PagingConfig;
use routine_repository::{
    DatabasePool, DatabasePoolInterface, SqliteCompanyRepository, SqliteEmployeeRepository,
};
use routine_service::{build_registry, CompanyServiceImpl, EmployeeServiceImpl};
use std::sync::Arc;

pub const MICROSOFT_ID: &str = "bbdee09c-089b-4d30-bece-44df5923716c";
pub const GOOGLE_ID: &str = "6fb600c1-9011-4fd7-9234-881379716440";
pub const ALIPAY_ID: &str = "5efc910b-2f45-43df-afae-620d40542853";

pub struct TestServices {
    pub companies: CompanyServiceImpl,
    pub employees: EmployeeServiceImpl,
}

impl TestServices {
    pub async fn seeded() -> Self {
        let pool = DatabasePool::in_memory()
            .await
            .expect("Failed to open in-memory database");
        pool.seed().await.expect("Failed to seed database");

        let pool: Arc<dyn DatabasePoolInterface> = Arc::new(pool);
        let company_repository = Arc::new(SqliteCompanyRepository::new(pool.clone()));
        let employee_repository = Arc::new(SqliteEmployeeRepository::new(pool));
        let mappings = Arc::new(build_registry().expect("Invalid mapping tables"));

        Self {
            companies: CompanyServiceImpl::new(
                company_repository.clone(),
                mappings.clone(),
                PagingConfig::default(),
            ),
            employees: EmployeeServiceImpl::new(company_repository, employee_repository, mappings),
        }
    }
}
