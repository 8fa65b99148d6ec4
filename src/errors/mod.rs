use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;
use sqlx::error::ErrorKind;
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;
use validator::{ValidationError, ValidationErrors};

#[derive(Debug)]
pub enum AppError {
    Validation(ValidationErrors),
    BadRequest(String),
    NotFound(String),
    DatabaseError(String),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    fields: Option<BTreeMap<String, Vec<String>>>,
}

impl AppError {
    /// Validation failure carrying a single message for `field`.
    pub fn invalid_field(field: &'static str, code: &'static str, message: impl Into<String>) -> Self {
        let mut errors = ValidationErrors::new();
        errors.add(field, field_error(code, message));
        AppError::Validation(errors)
    }
}

/// Build a `ValidationError` with a human readable message.
pub fn field_error(code: &'static str, message: impl Into<String>) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Owned(message.into()));
    error
}

/// Flatten `errors` into `field -> [message]`, falling back to the error code
/// when a validator did not attach a message.
pub fn field_messages(errors: &ValidationErrors) -> BTreeMap<String, Vec<String>> {
    errors
        .field_errors()
        .into_iter()
        .map(|(field, errs)| {
            let messages = errs
                .iter()
                .map(|e| match &e.message {
                    Some(message) => message.to_string(),
                    None => e.code.to_string(),
                })
                .collect();
            (field.to_string(), messages)
        })
        .collect()
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Validation(errors) => {
                let fields: Vec<String> = field_messages(errors).into_keys().collect();
                write!(f, "Validation failed: {}", fields.join(", "))
            }
            AppError::BadRequest(msg) => write!(f, "Bad Request: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            AppError::DatabaseError(msg) => write!(f, "Database Error: {}", msg),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::Validation(errors) => HttpResponse::BadRequest().json(ErrorResponse {
                error: "Validation failed".to_string(),
                fields: Some(field_messages(errors)),
            }),
            AppError::BadRequest(msg) => HttpResponse::BadRequest().json(ErrorResponse {
                error: msg.clone(),
                fields: None,
            }),
            AppError::NotFound(msg) => HttpResponse::NotFound().json(ErrorResponse {
                error: msg.clone(),
                fields: None,
            }),
            AppError::DatabaseError(msg) => {
                log::error!("{}", msg);
                HttpResponse::InternalServerError().json(ErrorResponse {
                    error: "Internal server error".to_string(),
                    fields: None,
                })
            }
        }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::RowNotFound = err {
            return AppError::NotFound("Record not found".to_string());
        }
        if let Some(db_err) = err.as_database_error() {
            match db_err.kind() {
                ErrorKind::UniqueViolation => {
                    return AppError::invalid_field(
                        "email",
                        "unique",
                        "employee with this email already exists.",
                    )
                }
                ErrorKind::ForeignKeyViolation => {
                    return AppError::invalid_field(
                        "employee",
                        "does_not_exist",
                        "Referenced employee does not exist.",
                    )
                }
                ErrorKind::CheckViolation => {
                    return AppError::invalid_field(
                        "rating",
                        "invalid_choice",
                        "Rating must be between 1 and 5.",
                    )
                }
                _ => {}
            }
        }
        AppError::DatabaseError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_map_to_bad_request() {
        let err = AppError::invalid_field("email", "unique", "taken");
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "Validation failed: email");
    }

    #[test]
    fn field_messages_fall_back_to_code() {
        let mut errors = ValidationErrors::new();
        errors.add("rating", ValidationError::new("range"));
        errors.add("rating", field_error("invalid_choice", "not a valid choice"));

        let messages = field_messages(&errors);
        assert_eq!(
            messages.get("rating"),
            Some(&vec!["range".to_string(), "not a valid choice".to_string()])
        );
    }

    #[test]
    fn row_not_found_becomes_not_found() {
        let err = AppError::from(sqlx::Error::RowNotFound);
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn store_faults_are_internal_errors() {
        let err = AppError::from(sqlx::Error::PoolTimedOut);
        assert!(matches!(err, AppError::DatabaseError(_)));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
