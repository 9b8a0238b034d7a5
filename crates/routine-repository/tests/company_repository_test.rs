//! Integration tests for SqliteCompanyRepository against in-memory SQLite.

mod common;

use common::{company, employee, TestDatabase, GOOGLE_ID, MICROSOFT_ID};
use routine_core::{CompanyId, Ordering, PageRequest, SortDirection, SortTarget};
use routine_repository::{
    CompanyFilter, CompanyRepository, EmployeeFilter, EmployeeRepository,
    SqliteCompanyRepository, SqliteEmployeeRepository,
};

fn by_name() -> Ordering {
    Ordering::new()
        .then_order_by("name", SortDirection::Ascending)
        .then_order_by("id", SortDirection::Ascending)
}

#[tokio::test]
async fn test_save_and_find_by_id() {
    let db = TestDatabase::new().await;
    let repo = SqliteCompanyRepository::new(db.pool());

    let acme = company("Acme");
    repo.save(&acme, &[]).await.expect("Failed to save company");

    let found = repo
        .find_by_id(acme.id)
        .await
        .expect("Query failed")
        .expect("Company not found");
    assert_eq!(found, acme);
    assert!(repo.exists(acme.id).await.unwrap());
}

#[tokio::test]
async fn test_find_by_id_not_found() {
    let db = TestDatabase::new().await;
    let repo = SqliteCompanyRepository::new(db.pool());

    assert!(repo.find_by_id(CompanyId::new()).await.unwrap().is_none());
    assert!(!repo.exists(CompanyId::new()).await.unwrap());
}

#[tokio::test]
async fn test_page_of_twenty_three_companies() {
    let db = TestDatabase::new().await;
    let repo = SqliteCompanyRepository::new(db.pool());

    let companies: Vec<_> = (0..23)
        .map(|i| (company(&format!("Company {:02}", i)), Vec::new()))
        .collect();
    repo.save_all(&companies).await.unwrap();

    let filter = CompanyFilter {
        ordering: by_name(),
        ..CompanyFilter::default()
    };
    let page = repo.find_page(&filter, PageRequest::new(3, 5)).await.unwrap();

    assert_eq!(page.len(), 5);
    assert_eq!(page.total_count, 23);
    assert_eq!(page.total_pages, 5);
    assert!(page.has_previous());
    assert!(page.has_next());
    assert_eq!(page.items[0].name, "Company 10");
    assert_eq!(page.items[4].name, "Company 14");
}

#[tokio::test]
async fn test_page_beyond_last_is_empty_with_real_totals() {
    let db = TestDatabase::seeded().await;
    let repo = SqliteCompanyRepository::new(db.pool());

    let filter = CompanyFilter {
        ordering: by_name(),
        ..CompanyFilter::default()
    };
    let page = repo.find_page(&filter, PageRequest::new(100, 5)).await.unwrap();

    assert!(page.is_empty());
    assert_eq!(page.total_count, 12);
    assert_eq!(page.total_pages, 3);
    assert!(!page.has_next());
}

#[tokio::test]
async fn test_filters_by_exact_name_and_search_term() {
    let db = TestDatabase::seeded().await;
    let repo = SqliteCompanyRepository::new(db.pool());

    let exact = CompanyFilter {
        company_name: Some("Google".to_string()),
        ordering: by_name(),
        ..CompanyFilter::default()
    };
    let page = repo.find_page(&exact, PageRequest::first()).await.unwrap();
    assert_eq!(page.total_count, 1);
    assert_eq!(page.items[0].id.to_string(), GOOGLE_ID);

    // "evil" only appears in introductions
    let search = CompanyFilter {
        search_term: Some("evil".to_string()),
        ordering: by_name(),
        ..CompanyFilter::default()
    };
    let page = repo.find_page(&search, PageRequest::first()).await.unwrap();
    let names: Vec<_> = page.items.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Baidu", "Google"]);

    let both = CompanyFilter {
        company_name: Some("Baidu".to_string()),
        search_term: Some("evil".to_string()),
        ordering: by_name(),
    };
    assert_eq!(repo.find_page(&both, PageRequest::first()).await.unwrap().total_count, 1);
}

#[tokio::test]
async fn test_descending_order_is_pushed_to_sql() {
    let db = TestDatabase::seeded().await;
    let repo = SqliteCompanyRepository::new(db.pool());

    let filter = CompanyFilter {
        ordering: Ordering::new()
            .then_order_by("name", SortDirection::Descending)
            .then_order_by("id", SortDirection::Ascending),
        ..CompanyFilter::default()
    };
    let page = repo.find_page(&filter, PageRequest::new(1, 2)).await.unwrap();
    let names: Vec<_> = page.items.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Youku", "Yahoo"]);
}

#[tokio::test]
async fn test_find_by_ids_orders_by_name_and_skips_missing() {
    let db = TestDatabase::seeded().await;
    let repo = SqliteCompanyRepository::new(db.pool());

    let ids = [
        MICROSOFT_ID.parse::<CompanyId>().unwrap(),
        GOOGLE_ID.parse::<CompanyId>().unwrap(),
        CompanyId::new(),
    ];
    let found = repo.find_by_ids(&ids).await.unwrap();
    let names: Vec<_> = found.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Google", "Microsoft"]);

    assert!(repo.find_by_ids(&[]).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_save_with_employees_and_cascade_delete() {
    let db = TestDatabase::new().await;
    let companies = SqliteCompanyRepository::new(db.pool());
    let employees = SqliteEmployeeRepository::new(db.pool());

    let acme = company("Acme");
    let staff = vec![
        employee(acme.id, "ACME000001", "Ann", 1990),
        employee(acme.id, "ACME000002", "Bob", 1985),
    ];
    companies.save(&acme, &staff).await.unwrap();

    let listed = employees
        .find_all(acme.id, &EmployeeFilter::default())
        .await
        .unwrap();
    assert_eq!(listed.len(), 2);

    assert!(companies.delete(acme.id).await.unwrap());
    assert!(!companies.delete(acme.id).await.unwrap());

    let listed = employees
        .find_all(acme.id, &EmployeeFilter::default())
        .await
        .unwrap();
    assert!(listed.is_empty());
}

#[tokio::test]
async fn test_save_all_is_atomic() {
    let db = TestDatabase::new().await;
    let repo = SqliteCompanyRepository::new(db.pool());

    let first = company("First");
    let second = company("Second");
    let batch = vec![
        (first.clone(), vec![employee(first.id, "DUPL000001", "Ann", 1990)]),
        (second.clone(), vec![employee(second.id, "DUPL000001", "Bob", 1991)]),
    ];

    let err = repo.save_all(&batch).await.unwrap_err();
    assert_eq!(err.status_code(), 409);
    assert!(!repo.exists(first.id).await.unwrap());
}
