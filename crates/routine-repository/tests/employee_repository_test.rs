//! Integration tests for SqliteEmployeeRepository against in-memory SQLite.

mod common;

use common::{company, employee, TestDatabase, MICROSOFT_ID};
use routine_core::{
    apply_sort, CompanyId, EmployeeId, Gender, Ordering, PropertyMapping, SortDirection,
    SortTarget,
};
use routine_repository::{
    CompanyRepository, EmployeeFilter, EmployeeRepository, SqliteCompanyRepository,
    SqliteEmployeeRepository,
};

fn microsoft() -> CompanyId {
    MICROSOFT_ID.parse().unwrap()
}

fn by_employee_no() -> Ordering {
    Ordering::new().then_order_by("employee_no", SortDirection::Ascending)
}

#[tokio::test]
async fn test_lists_seeded_employees_in_order() {
    let db = TestDatabase::seeded().await;
    let repo = SqliteEmployeeRepository::new(db.pool());

    let filter = EmployeeFilter {
        ordering: by_employee_no(),
        ..EmployeeFilter::default()
    };
    let employees = repo.find_all(microsoft(), &filter).await.unwrap();
    let numbers: Vec<_> = employees.iter().map(|e| e.employee_no.as_str()).collect();
    assert_eq!(numbers, vec!["MSFT000231", "MSFT000245"]);
}

#[tokio::test]
async fn test_filters_by_gender_and_q() {
    let db = TestDatabase::seeded().await;
    let repo = SqliteEmployeeRepository::new(db.pool());
    let alipay = "5efc910b-2f45-43df-afae-620d40542853".parse().unwrap();

    let women = EmployeeFilter {
        gender: Some(Gender::Female),
        ..EmployeeFilter::default()
    };
    let found = repo.find_all(alipay, &women).await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].first_name, "Lorraine");

    let q = EmployeeFilter {
        q: Some("Vince".to_string()),
        ..EmployeeFilter::default()
    };
    let found = repo.find_all(microsoft(), &q).await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].last_name, "Carter");

    let by_number = EmployeeFilter {
        q: Some("000231".to_string()),
        ..EmployeeFilter::default()
    };
    assert_eq!(repo.find_all(microsoft(), &by_number).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_inverted_age_sort_orders_by_birth_date_descending() {
    let db = TestDatabase::new().await;
    let companies = SqliteCompanyRepository::new(db.pool());
    let repo = SqliteEmployeeRepository::new(db.pool());

    let acme = company("Acme");
    let staff = vec![
        employee(acme.id, "ACME000001", "Old", 1960),
        employee(acme.id, "ACME000002", "Young", 2000),
        employee(acme.id, "ACME000003", "Middle", 1980),
    ];
    companies.save(&acme, &staff).await.unwrap();

    let mapping = PropertyMapping::builder()
        .map("Id", ["id"])
        .map_inverted("Age", ["date_of_birth"])
        .build()
        .unwrap();
    let filter = EmployeeFilter {
        ordering: apply_sort(Ordering::new(), "age", &mapping).unwrap(),
        ..EmployeeFilter::default()
    };

    let found = repo.find_all(acme.id, &filter).await.unwrap();
    let names: Vec<_> = found.iter().map(|e| e.first_name.as_str()).collect();
    assert_eq!(names, vec!["Young", "Middle", "Old"]);
}

#[tokio::test]
async fn test_lookup_is_scoped_to_company() {
    let db = TestDatabase::seeded().await;
    let repo = SqliteEmployeeRepository::new(db.pool());
    let nick: EmployeeId = "4b501cb3-d168-4cc0-b375-48fb33f318a4".parse().unwrap();
    let google = "6fb600c1-9011-4fd7-9234-881379716440".parse().unwrap();

    assert!(repo.find_by_id(microsoft(), nick).await.unwrap().is_some());
    assert!(repo.find_by_id(google, nick).await.unwrap().is_none());
    assert!(!repo.delete(google, nick).await.unwrap());
}

#[tokio::test]
async fn test_save_update_delete() {
    let db = TestDatabase::seeded().await;
    let repo = SqliteEmployeeRepository::new(db.pool());

    let mut hire = employee(microsoft(), "MSFT000999", "Grace", 1990);
    repo.save(&hire).await.unwrap();

    hire.first_name = "Ada".to_string();
    hire.gender = Gender::Female;
    assert!(repo.update(&hire).await.unwrap());

    let found = repo.find_by_id(microsoft(), hire.id).await.unwrap().unwrap();
    assert_eq!(found.first_name, "Ada");
    assert_eq!(found.gender, Gender::Female);

    assert!(repo.delete(microsoft(), hire.id).await.unwrap());
    assert!(repo.find_by_id(microsoft(), hire.id).await.unwrap().is_none());

    let ghost = employee(microsoft(), "MSFT000998", "Ghost", 1990);
    assert!(!repo.update(&ghost).await.unwrap());
}

#[tokio::test]
async fn test_duplicate_employee_number_is_conflict() {
    let db = TestDatabase::seeded().await;
    let repo = SqliteEmployeeRepository::new(db.pool());

    let duplicate = employee(microsoft(), "MSFT000231", "Copy", 1990);
    let err = repo.save(&duplicate).await.unwrap_err();
    assert_eq!(err.error_code(), "CONFLICT");
}

#[tokio::test]
async fn test_employee_for_unknown_company_is_rejected() {
    let db = TestDatabase::new().await;
    let repo = SqliteEmployeeRepository::new(db.pool());

    let orphan = employee(CompanyId::new(), "ORPH000001", "Orphan", 1990);
    assert!(repo.save(&orphan).await.is_err());
}
