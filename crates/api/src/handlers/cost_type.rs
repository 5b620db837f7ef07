//! Handlers for the `/types` general-cost catalog.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use bidflow_core::general_cost::validate_type_name;
use bidflow_db::models::general_cost::{CostType, CreateCostType};
use bidflow_db::repositories::CostTypeRepo;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/types
pub async fn list(State(state): State<AppState>) -> AppResult<Json<DataResponse<Vec<CostType>>>> {
    let types = CostTypeRepo::list(&state.pool).await?;
    Ok(Json(DataResponse::new(types)))
}

/// POST /api/v1/types
///
/// Existing BOQs pick up the new type on their next general-cost read.
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateCostType>,
) -> AppResult<(StatusCode, Json<DataResponse<CostType>>)> {
    validate_type_name(&input.name)?;
    let cost_type = CostTypeRepo::create(&state.pool, input.name.trim()).await?;
    Ok((StatusCode::CREATED, Json(DataResponse::new(cost_type))))
}
