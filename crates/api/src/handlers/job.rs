//! Handlers for the `/jobs` catalog.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use bidflow_core::error::CoreError;
use bidflow_core::types::DbId;
use bidflow_db::models::catalog::{CreateJob, CreateJobMaterial, Job, JobMaterial};
use bidflow_db::repositories::{JobRepo, MaterialRepo};
use rust_decimal::Decimal;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/jobs
pub async fn list(State(state): State<AppState>) -> AppResult<Json<DataResponse<Vec<Job>>>> {
    let jobs = JobRepo::list(&state.pool).await?;
    Ok(Json(DataResponse::new(jobs)))
}

/// POST /api/v1/jobs
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateJob>,
) -> AppResult<(StatusCode, Json<DataResponse<Job>>)> {
    input.validate()?;
    let job = JobRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse::new(job))))
}

/// POST /api/v1/jobs/{id}/materials
///
/// Records how much of a material one unit of the job consumes.
pub async fn add_material(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<CreateJobMaterial>,
) -> AppResult<(StatusCode, Json<DataResponse<JobMaterial>>)> {
    if input.quantity <= Decimal::ZERO {
        return Err(CoreError::Validation("quantity must be greater than 0".into()).into());
    }
    JobRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("Job", id))?;
    MaterialRepo::find_by_id(&state.pool, input.material_id)
        .await?
        .ok_or(AppError::not_found("Material", input.material_id))?;

    let link = JobRepo::upsert_material(&state.pool, id, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse::new(link))))
}

/// GET /api/v1/jobs/{id}/materials
pub async fn list_materials(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<JobMaterial>>>> {
    JobRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("Job", id))?;
    let links = JobRepo::list_materials(&state.pool, id).await?;
    Ok(Json(DataResponse::new(links)))
}
