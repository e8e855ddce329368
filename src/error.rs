use std::collections::BTreeMap;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// Field-keyed validation messages, reported all at once before any write.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// Application error type for HTTP handlers.
///
/// Implements [`IntoResponse`] so handlers can return `AppResult<T>` and
/// propagate with `?`. Database and internal errors are sanitized; the
/// original error is logged, never exposed to the caller.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Validation failed")]
    Validation(FieldErrors),

    #[error("Conflict on {field}: {message}")]
    Conflict { field: String, message: String },

    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: i64 },

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Build a validation error from (field, message) pairs.
    pub fn validation(pairs: Vec<(String, String)>) -> Self {
        let mut errors = FieldErrors::new();
        for (field, message) in pairs {
            errors.entry(field).or_default().push(message);
        }
        AppError::Validation(errors)
    }

    pub fn conflict(field: &str, message: &str) -> Self {
        AppError::Conflict {
            field: field.to_string(),
            message: message.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::Validation(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                json!({ "error": "Validation failed", "errors": errors }),
            ),
            AppError::Conflict { field, message } => {
                let mut errors = serde_json::Map::new();
                errors.insert(field, json!([message.clone()]));
                (
                    StatusCode::CONFLICT,
                    json!({ "error": message, "errors": errors }),
                )
            }
            AppError::NotFound { entity, id } => (
                StatusCode::NOT_FOUND,
                json!({ "error": format!("{} with id {} not found", entity, id) }),
            ),
            AppError::FileNotFound(name) => (
                StatusCode::NOT_FOUND,
                json!({ "error": format!("File not found: {}", name) }),
            ),
            AppError::Database(err) => {
                tracing::error!("Database error: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "An internal error occurred" }),
                )
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "An internal error occurred" }),
                )
            }
        };

        (status, axum::Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_groups_messages_by_field() {
        let err = AppError::validation(vec![
            ("due_date".to_string(), "must be a future date".to_string()),
            ("reviewers".to_string(), "at least one reviewer required".to_string()),
            ("due_date".to_string(), "required".to_string()),
        ]);
        match err {
            AppError::Validation(fields) => {
                assert_eq!(fields["due_date"].len(), 2);
                assert_eq!(fields["reviewers"].len(), 1);
            }
            _ => panic!("expected validation error"),
        }
    }
}
