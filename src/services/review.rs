use chrono::Utc;
use log::info;
use sqlx::SqlitePool;

use crate::errors::AppError;
use crate::models::review::{Review, ReviewFields, ReviewPayload};
use crate::services::{next_timestamp, UpdateMode};

pub(crate) const REVIEW_COLUMNS: &str =
    "id, employee_id, rating, comments, created_at, updated_at";

/// Review operations, addressed by numeric id only.
#[derive(Clone)]
pub struct ReviewService {
    pool: SqlitePool,
}

impl ReviewService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, payload: ReviewPayload) -> Result<Review, AppError> {
        let fields = payload.merge(None).map_err(AppError::Validation)?;
        self.ensure_employee_exists(fields.employee_id).await?;

        let now = Utc::now();
        let query = format!(
            "INSERT INTO reviews (employee_id, rating, comments, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {REVIEW_COLUMNS}"
        );
        let review = sqlx::query_as::<_, Review>(&query)
            .bind(fields.employee_id)
            .bind(fields.rating.value())
            .bind(fields.comments.clone())
            .bind(now)
            .bind(now)
            .fetch_one(&self.pool)
            .await?;

        info!(
            "Created review {} for employee {}: {}",
            review.id, review.employee_id, fields.rating
        );
        Ok(review)
    }

    pub async fn get(&self, id: i64) -> Result<Review, AppError> {
        let query = format!("SELECT {REVIEW_COLUMNS} FROM reviews WHERE id = $1");
        sqlx::query_as::<_, Review>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Review {} not found", id)))
    }

    pub async fn list(&self) -> Result<Vec<Review>, AppError> {
        let query = format!("SELECT {REVIEW_COLUMNS} FROM reviews ORDER BY id");
        let reviews = sqlx::query_as::<_, Review>(&query)
            .fetch_all(&self.pool)
            .await?;
        Ok(reviews)
    }

    pub async fn update(
        &self,
        id: i64,
        payload: ReviewPayload,
        mode: UpdateMode,
    ) -> Result<Review, AppError> {
        let current = self.get(id).await?;
        let merged = match mode {
            UpdateMode::Full => payload.keep_comments(&current).merge(None),
            UpdateMode::Partial => payload.merge(Some(&current)),
        };
        let fields: ReviewFields = merged.map_err(AppError::Validation)?;
        if fields.employee_id != current.employee_id {
            self.ensure_employee_exists(fields.employee_id).await?;
        }

        let query = format!(
            "UPDATE reviews SET
                employee_id = $1,
                rating = $2,
                comments = $3,
                updated_at = $4
             WHERE id = $5
             RETURNING {REVIEW_COLUMNS}"
        );
        let review = sqlx::query_as::<_, Review>(&query)
            .bind(fields.employee_id)
            .bind(fields.rating.value())
            .bind(fields.comments)
            .bind(next_timestamp(current.updated_at))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Review {} not found", id)))?;

        info!("Updated review {} ({:?})", review.id, mode);
        Ok(review)
    }

    /// Permanently remove a review; its employee is untouched.
    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        let deleted = sqlx::query("DELETE FROM reviews WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        if deleted == 0 {
            return Err(AppError::NotFound(format!("Review {} not found", id)));
        }
        info!("Deleted review {}", id);
        Ok(())
    }

    async fn ensure_employee_exists(&self, employee_id: i64) -> Result<(), AppError> {
        let exists = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM employees WHERE id = $1")
            .bind(employee_id)
            .fetch_one(&self.pool)
            .await?;

        if exists == 0 {
            return Err(AppError::invalid_field(
                "employee",
                "does_not_exist",
                format!("Invalid pk \"{}\" - object does not exist.", employee_id),
            ));
        }
        Ok(())
    }
}
