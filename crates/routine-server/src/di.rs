//! Dependency injection module using Shaku.
//!
//! A single module holds the whole stack for one process: the database
//! pool, both SQLite repositories and both services. Components that need
//! more than injected interfaces get their values as component parameters.

use routine_config::PagingConfig;
use routine_core::PropertyMappingRegistry;
use routine_repository::{
    CompanyRepository, DatabasePool, DatabasePoolInterface, DatabasePoolParameters,
    EmployeeRepository, SqliteCompanyRepository, SqliteEmployeeRepository,
};
use routine_service::{
    CompanyService, CompanyServiceImpl, CompanyServiceImplParameters, EmployeeService,
    EmployeeServiceImpl, EmployeeServiceImplParameters,
};
use shaku::{module, HasComponent};
use std::sync::Arc;

module! {
    pub RoutineModule {
        components = [
            DatabasePool,
            SqliteCompanyRepository,
            SqliteEmployeeRepository,
            CompanyServiceImpl,
            EmployeeServiceImpl,
        ],
        providers = [],
    }
}

/// Builds the module on top of an already connected pool.
///
/// The module's `DatabasePool` shares the connections of `db_pool`.
pub fn build_module(
    db_pool: &DatabasePool,
    mappings: Arc<PropertyMappingRegistry>,
    paging: PagingConfig,
) -> Arc<RoutineModule> {
    let module = RoutineModule::builder()
        .with_component_parameters::<DatabasePool>(DatabasePoolParameters {
            pool: db_pool.inner().clone(),
        })
        .with_component_parameters::<CompanyServiceImpl>(CompanyServiceImplParameters {
            mappings: Arc::clone(&mappings),
            paging,
        })
        .with_component_parameters::<EmployeeServiceImpl>(EmployeeServiceImplParameters {
            mappings,
        })
        .build();

    Arc::new(module)
}

/// Resolves the services consumed by the REST layer.
pub trait ServiceResolver {
    fn company_service(&self) -> Arc<dyn CompanyService>;

    fn employee_service(&self) -> Arc<dyn EmployeeService>;
}

impl ServiceResolver for RoutineModule {
    fn company_service(&self) -> Arc<dyn CompanyService> {
        self.resolve()
    }

    fn employee_service(&self) -> Arc<dyn EmployeeService> {
        self.resolve()
    }
}

/// Resolves the persistence components.
pub trait RepositoryResolver {
    fn database_pool(&self) -> Arc<dyn DatabasePoolInterface>;

    fn company_repository(&self) -> Arc<dyn CompanyRepository>;

    fn employee_repository(&self) -> Arc<dyn EmployeeRepository>;
}

impl RepositoryResolver for RoutineModule {
    fn database_pool(&self) -> Arc<dyn DatabasePoolInterface> {
        self.resolve()
    }

    fn company_repository(&self) -> Arc<dyn CompanyRepository> {
        self.resolve()
    }

    fn employee_repository(&self) -> Arc<dyn EmployeeRepository> {
        self.resolve()
    }
}
