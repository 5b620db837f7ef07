use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use bidflow_core::error::CoreError;
use serde_json::json;

/// Application-level error type for HTTP handlers and workflow usecases.
///
/// Wraps [`CoreError`] for domain errors and `sqlx::Error` for driver
/// errors surfaced by the repositories.
/// Implements [`IntoResponse`] to produce consistent JSON error responses.
/// The status code is chosen from the error kind, never from message text.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `bidflow_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::Core(CoreError::Validation(err.to_string()))
    }
}

impl AppError {
    /// Shorthand for a [`CoreError::NotFound`] wrapped in `AppError`.
    pub fn not_found(entity: &'static str, id: bidflow_core::types::DbId) -> Self {
        AppError::Core(CoreError::NotFound { entity, id })
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Core(core) => classify_core_error(core),
            AppError::Database(err) => classify_sqlx_error(err),
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Map a domain error kind to an HTTP status, error code and message.
fn classify_core_error(err: &CoreError) -> (StatusCode, &'static str, String) {
    let status = match err {
        CoreError::NotFound { .. } | CoreError::Missing(_) => StatusCode::NOT_FOUND,
        CoreError::Validation(_) | CoreError::InvalidTransition(_) | CoreError::InvalidState(_) => {
            StatusCode::BAD_REQUEST
        }
        CoreError::DependencyNotApproved(_) | CoreError::Conflict(_) => StatusCode::CONFLICT,
        CoreError::MissingPriceInformation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        CoreError::Internal(msg) => {
            tracing::error!(error = %msg, "Internal core error");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                err.code(),
                "An internal error occurred".to_string(),
            );
        }
    };
    (status, err.code(), err.to_string())
}

/// Classify a sqlx error into an HTTP status, error code, and message.
///
/// - `RowNotFound` maps to 404.
/// - Unique constraint violations (constraint name starting with `uq_`) map to 409.
/// - Foreign key violations map to 400; the referenced row does not exist.
/// - Everything else maps to 500 with a sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        ),
        sqlx::Error::Database(db_err) => {
            match db_err.code().as_deref() {
                Some("23505") => {
                    let constraint = db_err.constraint().unwrap_or("unknown");
                    if constraint.starts_with("uq_") {
                        return (
                            StatusCode::CONFLICT,
                            "CONFLICT",
                            format!("Duplicate value violates unique constraint: {constraint}"),
                        );
                    }
                }
                Some("23503") => {
                    let constraint = db_err.constraint().unwrap_or("unknown");
                    return (
                        StatusCode::BAD_REQUEST,
                        "VALIDATION_ERROR",
                        format!("Referenced record does not exist: {constraint}"),
                    );
                }
                _ => {}
            }
            tracing::error!(error = %db_err, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            )
        }
        other => {
            tracing::error!(error = %other, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: CoreError) -> StatusCode {
        AppError::Core(err).into_response().status()
    }

    #[test]
    fn core_kinds_map_to_status_codes() {
        let id = bidflow_core::types::DbId::nil();
        assert_eq!(status_of(CoreError::NotFound { entity: "Boq", id }), StatusCode::NOT_FOUND);
        assert_eq!(status_of(CoreError::Missing("x".into())), StatusCode::NOT_FOUND);
        assert_eq!(status_of(CoreError::Validation("x".into())), StatusCode::BAD_REQUEST);
        assert_eq!(status_of(CoreError::InvalidTransition("x".into())), StatusCode::BAD_REQUEST);
        assert_eq!(status_of(CoreError::InvalidState("x".into())), StatusCode::BAD_REQUEST);
        assert_eq!(
            status_of(CoreError::DependencyNotApproved("x".into())),
            StatusCode::CONFLICT
        );
        assert_eq!(status_of(CoreError::Conflict("x".into())), StatusCode::CONFLICT);
        assert_eq!(
            status_of(CoreError::MissingPriceInformation("x".into())),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            status_of(CoreError::Internal("x".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn row_not_found_is_404() {
        let response = AppError::Database(sqlx::Error::RowNotFound).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
