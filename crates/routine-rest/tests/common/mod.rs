//! Router over services backed by a seeded in-memory database.

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Method, Request, Response, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use routine_config::{PagingConfig, ServerConfig};
use routine_core::HealthCheck;
use routine_repository::{
    DatabasePool, DatabasePoolInterface, SqliteCompanyRepository, SqliteEmployeeRepository,
};
use routine_rest::{create_router, AppState};
use routine_service::{build_registry, CompanyServiceImpl, EmployeeServiceImpl};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

pub const MICROSOFT_ID: &str = "bbdee09c-089b-4d30-bece-44df5923716c";
pub const GOOGLE_ID: &str = "6fb600c1-9011-4fd7-9234-881379716440";
pub const ALIPAY_ID: &str = "5efc910b-2f45-43df-afae-620d40542853";
pub const NICK_CARTER_ID: &str = "4b501cb3-d168-4cc0-b375-48fb33f318a4";

pub struct TestApp {
    router: Router,
}

impl TestApp {
    pub async fn seeded() -> Self {
        let pool = DatabasePool::in_memory()
            .await
            .expect("Failed to open in-memory database");
        pool.seed().await.expect("Failed to seed database");
        let pool = Arc::new(pool);

        let database: Arc<dyn DatabasePoolInterface> = pool.clone();
        let company_repository = Arc::new(SqliteCompanyRepository::new(database.clone()));
        let employee_repository = Arc::new(SqliteEmployeeRepository::new(database));
        let mappings = Arc::new(build_registry().expect("Invalid mapping tables"));

        let state = AppState::new(
            Arc::new(CompanyServiceImpl::new(
                company_repository.clone(),
                mappings.clone(),
                PagingConfig::default(),
            )),
            Arc::new(EmployeeServiceImpl::new(
                company_repository,
                employee_repository,
                mappings,
            )),
        )
        .with_health_check(pool as Arc<dyn HealthCheck>);

        Self {
            router: create_router(state, &ServerConfig::default()),
        }
    }

    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("Router is infallible")
    }

    pub async fn get(&self, uri: &str) -> Response<Body> {
        self.send(
            Request::builder()
                .uri(uri)
                .header(header::HOST, "localhost:8080")
                .body(Body::empty())
                .unwrap(),
        )
        .await
    }

    pub async fn send_json(&self, method: Method, uri: &str, body: Value) -> Response<Body> {
        self.send(
            Request::builder()
                .method(method)
                .uri(uri)
                .header(header::HOST, "localhost:8080")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }

    pub async fn delete(&self, uri: &str) -> Response<Body> {
        self.send(
            Request::builder()
                .method(Method::DELETE)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
    }
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub fn assert_status(response: &Response<Body>, status: StatusCode) {
    assert_eq!(response.status(), status, "unexpected status");
}
