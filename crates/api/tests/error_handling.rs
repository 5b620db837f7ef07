//! Tests for `AppError` → HTTP response mapping.
//!
//! These call `IntoResponse` directly and need no database.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use bidflow_api::error::AppError;
use bidflow_core::error::CoreError;
use bidflow_core::types::DbId;
use http_body_util::BodyExt;

async fn error_to_response(err: AppError) -> (StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

#[tokio::test]
async fn not_found_error_returns_404() {
    let id = DbId::nil();
    let (status, json) = error_to_response(AppError::not_found("Project", id)).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["error"], format!("Entity not found: Project with id {id}"));
}

#[tokio::test]
async fn missing_draft_quotation_returns_404() {
    let err = AppError::Core(CoreError::Missing("no draft quotation found to approve".into()));
    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "no draft quotation found to approve");
}

#[tokio::test]
async fn backward_transition_returns_400() {
    let err = AppError::Core(CoreError::InvalidTransition(
        "cannot change status from approved to draft".into(),
    ));
    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "INVALID_TRANSITION");
    assert_eq!(json["error"], "cannot change status from approved to draft");
}

#[tokio::test]
async fn dependency_not_approved_returns_409() {
    let err = AppError::Core(CoreError::DependencyNotApproved("boq is not approved".into()));
    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["code"], "DEPENDENCY_NOT_APPROVED");
}

#[tokio::test]
async fn missing_price_information_returns_422() {
    let err = AppError::Core(CoreError::MissingPriceInformation(
        "missing price information for jobs: Wall".into(),
    ));
    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["code"], "MISSING_PRICE_INFORMATION");
}

#[tokio::test]
async fn core_internal_error_returns_500_and_sanitizes_message() {
    let err = AppError::Core(CoreError::Internal("pool exhausted at 10.0.0.3".into()));
    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "INTERNAL_ERROR");
    assert_eq!(json["error"], "An internal error occurred");
}

#[tokio::test]
async fn row_not_found_returns_404() {
    let (status, json) = error_to_response(AppError::Database(sqlx::Error::RowNotFound)).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
}
