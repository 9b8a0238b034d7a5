//! Application state for Axum handlers.

use routine_core::HealthCheck;
use routine_service::{CompanyService, EmployeeService};
use shaku::{HasComponent, Module};
use std::sync::Arc;
use url::Url;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub company_service: Arc<dyn CompanyService>,
    pub employee_service: Arc<dyn EmployeeService>,
    /// Dependencies probed by `/ready`.
    pub health_checks: Vec<Arc<dyn HealthCheck>>,
    /// Base of every generated link; the request `Host` is used when unset.
    pub public_url: Option<Url>,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(
        company_service: Arc<dyn CompanyService>,
        employee_service: Arc<dyn EmployeeService>,
    ) -> Self {
        Self {
            company_service,
            employee_service,
            health_checks: Vec::new(),
            public_url: None,
        }
    }

    /// Resolves the services from a Shaku module.
    pub fn from_module<M>(module: &M) -> Self
    where
        M: Module + HasComponent<dyn CompanyService> + HasComponent<dyn EmployeeService>,
    {
        Self::new(
            HasComponent::<dyn CompanyService>::resolve(module),
            HasComponent::<dyn EmployeeService>::resolve(module),
        )
    }

    /// Adds a dependency to the readiness probe.
    #[must_use]
    pub fn with_health_check(mut self, check: Arc<dyn HealthCheck>) -> Self {
        self.health_checks.push(check);
        self
    }

    /// Pins the link base instead of deriving it from each request.
    #[must_use]
    pub fn with_public_url(mut self, public_url: Option<Url>) -> Self {
        self.public_url = public_url;
        self
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("health_checks", &self.health_checks.len())
            .field("public_url", &self.public_url)
            .finish_non_exhaustive()
    }
}
