//! Offline removal of employees that share an email address.
//!
//! Not safe to run alongside live traffic: an employee created during the
//! scan can slip past it.

use log::info;
use sqlx::SqlitePool;

use crate::errors::AppError;

/// Outcome of one deduplication run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DedupReport {
    /// Emails that had more than one employee.
    pub duplicate_groups: usize,
    /// Employees deleted across all groups.
    pub removed: u64,
}

/// Keep the lowest-id employee of every email group, delete the rest (reviews
/// first), then restore the unique index on `email`.
///
/// Runs in a single transaction; any store fault rolls back the whole run.
pub async fn remove_duplicate_emails(pool: &SqlitePool) -> Result<DedupReport, AppError> {
    let mut tx = pool.begin().await?;

    let emails = sqlx::query_scalar::<_, String>(
        "SELECT email FROM employees GROUP BY email HAVING COUNT(*) > 1 ORDER BY email",
    )
    .fetch_all(&mut *tx)
    .await?;

    let mut report = DedupReport::default();
    for email in &emails {
        let keep = sqlx::query_scalar::<_, i64>("SELECT MIN(id) FROM employees WHERE email = $1")
            .bind(email)
            .fetch_one(&mut *tx)
            .await?;

        sqlx::query(
            "DELETE FROM reviews WHERE employee_id IN
                (SELECT id FROM employees WHERE email = $1 AND id <> $2)",
        )
        .bind(email)
        .bind(keep)
        .execute(&mut *tx)
        .await?;

        let removed = sqlx::query("DELETE FROM employees WHERE email = $1 AND id <> $2")
            .bind(email)
            .bind(keep)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        info!("Kept employee {} for <{}>, removed {}", keep, email, removed);
        report.duplicate_groups += 1;
        report.removed += removed;
    }

    sqlx::query("CREATE UNIQUE INDEX IF NOT EXISTS employees_email_key ON employees (email)")
        .execute(&mut *tx)
        .await?;
    tx.commit().await?;

    info!(
        "Deduplication finished: {} group(s), {} employee(s) removed",
        report.duplicate_groups, report.removed
    );
    Ok(report)
}
