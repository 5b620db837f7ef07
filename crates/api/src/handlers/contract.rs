//! Handlers for the `/contracts` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use bidflow_core::types::DbId;
use bidflow_db::models::contract::{Contract, CreateContract, CreatePeriod, PeriodWithJobs};

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;
use crate::workflow::contract as usecase;

/// POST /api/v1/contracts/projects/{project_id}
pub async fn create(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
    Json(input): Json<CreateContract>,
) -> AppResult<(StatusCode, Json<DataResponse<Contract>>)> {
    let contract = usecase::create(&state.pool, project_id, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse::new(contract))))
}

/// GET /api/v1/contracts/projects/{project_id}
pub async fn get_for_project(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Contract>>> {
    let contract = usecase::get_for_project(&state.pool, project_id).await?;
    Ok(Json(DataResponse::new(contract)))
}

/// POST /api/v1/contracts/{id}/periods
pub async fn create_period(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<CreatePeriod>,
) -> AppResult<(StatusCode, Json<DataResponse<PeriodWithJobs>>)> {
    let period = usecase::create_period(&state.pool, id, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse::new(period))))
}

/// GET /api/v1/contracts/{id}/periods
pub async fn list_periods(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<PeriodWithJobs>>>> {
    let periods = usecase::list_periods(&state.pool, id).await?;
    Ok(Json(DataResponse::new(periods)))
}
