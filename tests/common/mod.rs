#![allow(dead_code)]

use chrono::{NaiveDate, Utc};
use serde_json::{json, Value};
use sqlx::SqlitePool;

use employee_reviews::db;

/// Fresh in-memory store with the schema applied.
pub async fn test_pool() -> SqlitePool {
    let pool = db::create_pool("sqlite::memory:", 1)
        .await
        .expect("in-memory pool");
    db::run_migrations(&pool).await.expect("migrations");
    pool
}

pub fn employee_body(first_name: &str, last_name: &str, email: &str) -> Value {
    json!({
        "first_name": first_name,
        "last_name": last_name,
        "email": email,
        "contact_number": "1234567890",
        "contact_info": "123 Main St",
        "department": "Engineering",
        "birth_date": "1990-01-01",
        "hire_date": "2020-01-01"
    })
}

pub async fn employee_count(pool: &SqlitePool) -> i64 {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM employees")
        .fetch_one(pool)
        .await
        .expect("count employees")
}

pub async fn review_count(pool: &SqlitePool, employee_id: i64) -> i64 {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM reviews WHERE employee_id = $1")
        .bind(employee_id)
        .fetch_one(pool)
        .await
        .expect("count reviews")
}

/// Insert straight into the table, bypassing service validation.
pub async fn insert_employee_row(pool: &SqlitePool, first_name: &str, email: &str) -> i64 {
    let now = Utc::now();
    let date = NaiveDate::from_ymd_opt(1990, 1, 1).expect("valid date");
    sqlx::query_scalar::<_, i64>(
        "INSERT INTO employees (first_name, last_name, email, contact_number, contact_info,
                                department, birth_date, hire_date, created_at, updated_at)
         VALUES ($1, 'Doe', $2, '555', 'Somewhere', 'Ops', $3, $3, $4, $4)
         RETURNING id",
    )
    .bind(first_name)
    .bind(email)
    .bind(date)
    .bind(now)
    .fetch_one(pool)
    .await
    .expect("insert employee row")
}

pub async fn insert_review_row(pool: &SqlitePool, employee_id: i64, rating: i64) -> i64 {
    let now = Utc::now();
    sqlx::query_scalar::<_, i64>(
        "INSERT INTO reviews (employee_id, rating, comments, created_at, updated_at)
         VALUES ($1, $2, NULL, $3, $3)
         RETURNING id",
    )
    .bind(employee_id)
    .bind(rating)
    .bind(now)
    .fetch_one(pool)
    .await
    .expect("insert review row")
}
