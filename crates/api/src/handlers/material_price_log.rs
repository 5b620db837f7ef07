//! Handlers for the append-only `/material-price-logs` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use bidflow_core::error::CoreError;
use bidflow_core::money::validate_non_negative;
use bidflow_core::types::DbId;
use bidflow_db::models::material_price_log::{CreateMaterialPriceLog, MaterialPriceLog};
use bidflow_db::repositories::{BoqRepo, MaterialPriceLogRepo};
use rust_decimal::Decimal;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/material-price-logs
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateMaterialPriceLog>,
) -> AppResult<(StatusCode, Json<DataResponse<MaterialPriceLog>>)> {
    validate_non_negative(input.estimated_price, "estimated_price")?;
    if let Some(actual) = input.actual_price {
        validate_non_negative(actual, "actual_price")?;
    }
    if let Some(sale) = input.sale_price {
        validate_non_negative(sale, "sale_price")?;
    }
    if input.quantity.is_some_and(|q| q <= Decimal::ZERO) {
        return Err(CoreError::Validation("quantity must be greater than 0".into()).into());
    }
    BoqRepo::find_by_id(&state.pool, input.boq_id)
        .await?
        .ok_or(AppError::not_found("Boq", input.boq_id))?;

    let log = MaterialPriceLogRepo::create(&state.pool, &input).await?;
    tracing::debug!(
        log_id = %log.id,
        boq_id = %log.boq_id,
        job_id = %log.job_id,
        "Material price logged"
    );
    Ok((StatusCode::CREATED, Json(DataResponse::new(log))))
}

/// GET /api/v1/material-price-logs/boq/{boq_id}
pub async fn list_by_boq(
    State(state): State<AppState>,
    Path(boq_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<MaterialPriceLog>>>> {
    let logs = MaterialPriceLogRepo::list_by_boq(&state.pool, boq_id).await?;
    Ok(Json(DataResponse::new(logs)))
}
