//! Handlers for the `/materials` catalog.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use bidflow_db::models::catalog::{CreateMaterial, Material};
use bidflow_db::repositories::MaterialRepo;
use validator::Validate;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/materials
pub async fn list(State(state): State<AppState>) -> AppResult<Json<DataResponse<Vec<Material>>>> {
    let materials = MaterialRepo::list(&state.pool).await?;
    Ok(Json(DataResponse::new(materials)))
}

/// POST /api/v1/materials
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateMaterial>,
) -> AppResult<(StatusCode, Json<DataResponse<Material>>)> {
    input.validate()?;
    let material = MaterialRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse::new(material))))
}
