use chrono::Utc;
use log::info;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use std::collections::HashMap;

use crate::errors::AppError;
use crate::models::employee::{Employee, EmployeeFields, EmployeePayload};
use crate::models::review::Review;
use crate::services::resolver::resolve_employee;
use crate::services::review::REVIEW_COLUMNS;
use crate::services::{next_timestamp, UpdateMode};

pub(crate) const EMPLOYEE_COLUMNS: &str = "id, first_name, last_name, email, contact_number, \
     contact_info, department, birth_date, hire_date, created_at, updated_at";

/// Employee operations over an injected pool.
#[derive(Clone)]
pub struct EmployeeService {
    pool: SqlitePool,
}

impl EmployeeService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, payload: EmployeePayload) -> Result<Employee, AppError> {
        let fields = payload.merge(None).map_err(AppError::Validation)?;
        self.ensure_email_available(&fields.email, None).await?;

        let now = Utc::now();
        let query = format!(
            "INSERT INTO employees (first_name, last_name, email, contact_number, contact_info,
                                    department, birth_date, hire_date, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
             RETURNING {EMPLOYEE_COLUMNS}"
        );
        let employee = bind_fields(sqlx::query_as::<_, Employee>(&query), &fields)
            .bind(now)
            .bind(now)
            .fetch_one(&self.pool)
            .await?;

        info!("Created employee {} <{}>", employee.id, employee.email);
        Ok(employee)
    }

    pub async fn get(&self, identifier: &str) -> Result<Employee, AppError> {
        let mut employee = resolve_employee(&self.pool, identifier).await?;
        employee.reviews = self.reviews_of(employee.id).await?;
        Ok(employee)
    }

    /// All employees in id order, optionally narrowed to those whose first or
    /// last name contains `name` (case-insensitive).
    pub async fn list(&self, name: Option<&str>) -> Result<Vec<Employee>, AppError> {
        let name = name.filter(|name| !name.is_empty());

        let mut builder: QueryBuilder<'_, Sqlite> =
            QueryBuilder::new(format!("SELECT {EMPLOYEE_COLUMNS} FROM employees"));
        push_name_filter(&mut builder, name);
        builder.push(" ORDER BY id");
        let mut employees = builder
            .build_query_as::<Employee>()
            .fetch_all(&self.pool)
            .await?;

        // Reviews of the same set, selected by subquery rather than by id list.
        let mut builder: QueryBuilder<'_, Sqlite> = QueryBuilder::new(format!(
            "SELECT {REVIEW_COLUMNS} FROM reviews WHERE employee_id IN (SELECT id FROM employees"
        ));
        push_name_filter(&mut builder, name);
        builder.push(") ORDER BY id");
        let reviews = builder
            .build_query_as::<Review>()
            .fetch_all(&self.pool)
            .await?;

        attach_reviews(&mut employees, reviews);
        Ok(employees)
    }

    pub async fn update(
        &self,
        identifier: &str,
        payload: EmployeePayload,
        mode: UpdateMode,
    ) -> Result<Employee, AppError> {
        let current = resolve_employee(&self.pool, identifier).await?;
        let base = match mode {
            UpdateMode::Full => None,
            UpdateMode::Partial => Some(&current),
        };
        let fields = payload.merge(base).map_err(AppError::Validation)?;
        self.ensure_email_available(&fields.email, Some(current.id))
            .await?;

        let query = format!(
            "UPDATE employees SET
                first_name = $1,
                last_name = $2,
                email = $3,
                contact_number = $4,
                contact_info = $5,
                department = $6,
                birth_date = $7,
                hire_date = $8,
                updated_at = $9
             WHERE id = $10
             RETURNING {EMPLOYEE_COLUMNS}"
        );
        let mut employee = bind_fields(sqlx::query_as::<_, Employee>(&query), &fields)
            .bind(next_timestamp(current.updated_at))
            .bind(current.id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Employee '{}' not found", identifier)))?;

        employee.reviews = self.reviews_of(employee.id).await?;
        info!("Updated employee {} ({:?})", employee.id, mode);
        Ok(employee)
    }

    /// Remove the resolved employee and its reviews in one transaction.
    pub async fn delete(&self, identifier: &str) -> Result<Employee, AppError> {
        let employee = resolve_employee(&self.pool, identifier).await?;

        let mut tx = self.pool.begin().await?;
        let reviews = sqlx::query("DELETE FROM reviews WHERE employee_id = $1")
            .bind(employee.id)
            .execute(&mut *tx)
            .await?
            .rows_affected();
        sqlx::query("DELETE FROM employees WHERE id = $1")
            .bind(employee.id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;

        info!(
            "Deleted employee {} <{}> and {} review(s)",
            employee.id, employee.email, reviews
        );
        Ok(employee)
    }

    async fn ensure_email_available(&self, email: &str, exclude: Option<i64>) -> Result<(), AppError> {
        let taken = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM employees WHERE email = $1 AND ($2 IS NULL OR id <> $2)",
        )
        .bind(email)
        .bind(exclude)
        .fetch_one(&self.pool)
        .await?;

        if taken > 0 {
            return Err(AppError::invalid_field(
                "email",
                "unique",
                "employee with this email already exists.",
            ));
        }
        Ok(())
    }

    async fn reviews_of(&self, employee_id: i64) -> Result<Vec<Review>, AppError> {
        let query =
            format!("SELECT {REVIEW_COLUMNS} FROM reviews WHERE employee_id = $1 ORDER BY id");
        let reviews = sqlx::query_as::<_, Review>(&query)
            .bind(employee_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(reviews)
    }
}

/// Distribute `reviews` (in id order) over the employees they belong to.
fn attach_reviews(employees: &mut [Employee], reviews: Vec<Review>) {
    let mut by_employee: HashMap<i64, Vec<Review>> = HashMap::new();
    for review in reviews {
        by_employee.entry(review.employee_id).or_default().push(review);
    }
    for employee in employees.iter_mut() {
        employee.reviews = by_employee.remove(&employee.id).unwrap_or_default();
    }
}

/// ` WHERE first_name LIKE .. OR last_name LIKE ..` when a name is given.
fn push_name_filter(builder: &mut QueryBuilder<'_, Sqlite>, name: Option<&str>) {
    if let Some(name) = name {
        let pattern = like_pattern(name);
        builder
            .push(" WHERE first_name LIKE ")
            .push_bind(pattern.clone())
            .push(" ESCAPE '\\' OR last_name LIKE ")
            .push_bind(pattern)
            .push(" ESCAPE '\\'");
    }
}

fn bind_fields<'q, O>(
    query: sqlx::query::QueryAs<'q, Sqlite, O, sqlx::sqlite::SqliteArguments<'q>>,
    fields: &EmployeeFields,
) -> sqlx::query::QueryAs<'q, Sqlite, O, sqlx::sqlite::SqliteArguments<'q>> {
    query
        .bind(fields.first_name.clone())
        .bind(fields.last_name.clone())
        .bind(fields.email.clone())
        .bind(fields.contact_number.clone())
        .bind(fields.contact_info.clone())
        .bind(fields.department.clone())
        .bind(fields.birth_date)
        .bind(fields.hire_date)
}

/// `%name%` with LIKE wildcards in `name` escaped by `\`.
fn like_pattern(name: &str) -> String {
    let mut pattern = String::with_capacity(name.len() + 2);
    pattern.push('%');
    for c in name.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("oh"), "%oh%");
        assert_eq!(like_pattern("50%_off\\"), "%50\\%\\_off\\\\%");
    }
}
