//! Handlers for the `/general-costs` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use bidflow_core::types::DbId;
use bidflow_db::models::general_cost::{CreateGeneralCost, GeneralCost, UpdateCostValue};

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;
use crate::workflow::general_cost as usecase;

/// GET /api/v1/general-costs/boq/{boq_id}
///
/// Synchronizes the BOQ with the type catalog before listing.
pub async fn list_for_boq(
    State(state): State<AppState>,
    Path(boq_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<GeneralCost>>>> {
    let costs = usecase::ensure_for_boq(&state.pool, boq_id).await?;
    Ok(Json(DataResponse::new(costs)))
}

/// POST /api/v1/general-costs/boq/{boq_id}
pub async fn create(
    State(state): State<AppState>,
    Path(boq_id): Path<DbId>,
    Json(input): Json<CreateGeneralCost>,
) -> AppResult<(StatusCode, Json<DataResponse<GeneralCost>>)> {
    let cost = usecase::add(&state.pool, boq_id, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse::new(cost))))
}

/// PUT /api/v1/general-costs/{id}/estimated
pub async fn update_estimated(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateCostValue>,
) -> AppResult<Json<DataResponse<GeneralCost>>> {
    let cost = usecase::update_estimated(&state.pool, id, input.value).await?;
    Ok(Json(DataResponse::new(cost)))
}

/// PUT /api/v1/general-costs/{id}/actual
pub async fn update_actual(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateCostValue>,
) -> AppResult<Json<DataResponse<GeneralCost>>> {
    let cost = usecase::update_actual(&state.pool, id, input.value).await?;
    Ok(Json(DataResponse::new(cost)))
}

/// DELETE /api/v1/general-costs/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    usecase::remove(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
