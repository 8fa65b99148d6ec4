//! Service-level listing against a store larger than one statement can bind.

mod common;

use common::{insert_employee_row, insert_review_row, test_pool};
use employee_reviews::services::EmployeeService;

const LARGE_STAFF: i64 = 33_000;

#[tokio::test]
async fn list_handles_more_employees_than_sql_variables() {
    let pool = test_pool().await;
    let first = insert_employee_row(&pool, "Jane", "jane.doe@example.com").await;
    insert_review_row(&pool, first, 4).await;

    sqlx::query(
        "WITH RECURSIVE seq(n) AS (SELECT 1 UNION ALL SELECT n + 1 FROM seq WHERE n < $1)
         INSERT INTO employees (first_name, last_name, email, contact_number, contact_info,
                                department, birth_date, hire_date, created_at, updated_at)
         SELECT 'Staff', 'Member' || n, 'staff' || n || '@example.com', '555', 'Somewhere',
                'Ops', '1990-01-01', '1990-01-01', '2024-01-01T00:00:00Z', '2024-01-01T00:00:00Z'
         FROM seq",
    )
    .bind(LARGE_STAFF - 1)
    .execute(&pool)
    .await
    .expect("bulk insert employees");
    let last = insert_employee_row(&pool, "Zed", "zed@example.com").await;
    insert_review_row(&pool, last, 2).await;

    let service = EmployeeService::new(pool);
    let employees = service.list(None).await.expect("list every employee");

    assert_eq!(employees.len() as i64, LARGE_STAFF + 1);
    assert_eq!(employees[0].id, first);
    assert_eq!(employees[0].reviews.len(), 1);
    let zed = employees.last().expect("last employee");
    assert_eq!(zed.id, last);
    assert_eq!(zed.reviews[0].rating, 2);
    assert!(employees[1].reviews.is_empty());
}

#[tokio::test]
async fn filtered_list_embeds_only_matching_reviews() {
    let pool = test_pool().await;
    let jane = insert_employee_row(&pool, "Jane", "jane.doe@example.com").await;
    let bob = insert_employee_row(&pool, "Bob", "bob@example.com").await;
    insert_review_row(&pool, jane, 5).await;
    insert_review_row(&pool, bob, 1).await;

    let employees = EmployeeService::new(pool)
        .list(Some("jan"))
        .await
        .expect("filtered list");

    assert_eq!(employees.len(), 1);
    assert_eq!(employees[0].id, jane);
    let ratings: Vec<i64> = employees[0].reviews.iter().map(|r| r.rating).collect();
    assert_eq!(ratings, [5]);
}
