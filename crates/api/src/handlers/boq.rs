//! Handlers for the `/boqs` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use bidflow_core::types::DbId;
use bidflow_db::models::boq::{Boq, BoqJob, BoqWithJobs, CreateBoqJob, UpdateBoq, UpdateBoqJob};

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;
use crate::workflow::boq as usecase;

/// GET /api/v1/boqs/project/{project_id}
///
/// Creates a draft BOQ on first access.
pub async fn get_for_project(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<DataResponse<BoqWithJobs>>> {
    let boq = usecase::get_or_create_for_project(&state.pool, project_id).await?;
    Ok(Json(DataResponse::new(boq)))
}

/// GET /api/v1/boqs/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<BoqWithJobs>>> {
    let boq = usecase::get(&state.pool, id).await?;
    Ok(Json(DataResponse::new(boq)))
}

/// PUT /api/v1/boqs/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateBoq>,
) -> AppResult<Json<DataResponse<Boq>>> {
    let boq = usecase::update(&state.pool, id, &input).await?;
    Ok(Json(DataResponse::new(boq)))
}

/// PUT /api/v1/boqs/{id}/approve
pub async fn approve(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Boq>>> {
    let boq = usecase::approve(&state.pool, id).await?;
    Ok(Json(DataResponse::new(boq)))
}

/// POST /api/v1/boqs/{id}/jobs
pub async fn add_job(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<CreateBoqJob>,
) -> AppResult<(StatusCode, Json<DataResponse<BoqJob>>)> {
    let job = usecase::add_job(&state.pool, id, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse::new(job))))
}

/// PUT /api/v1/boqs/{id}/jobs/{boq_job_id}
pub async fn update_job(
    State(state): State<AppState>,
    Path((id, boq_job_id)): Path<(DbId, DbId)>,
    Json(input): Json<UpdateBoqJob>,
) -> AppResult<Json<DataResponse<BoqJob>>> {
    let job = usecase::update_job(&state.pool, id, boq_job_id, &input).await?;
    Ok(Json(DataResponse::new(job)))
}

/// DELETE /api/v1/boqs/{id}/jobs/{boq_job_id}
pub async fn remove_job(
    State(state): State<AppState>,
    Path((id, boq_job_id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    usecase::remove_job(&state.pool, id, boq_job_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
