//! Handlers for `/quotations/projects/{project_id}`.

use axum::extract::{Path, State};
use axum::Json;
use bidflow_core::types::DbId;
use bidflow_db::models::quotation::{Quotation, QuotationExport, QuotationView, UpdateQuotation};

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;
use crate::workflow::quotation as usecase;

/// POST /api/v1/quotations/projects/{project_id}
///
/// Create-or-get: the first call creates the draft quotation with the
/// configured defaults, later calls return it recomputed.
pub async fn compute(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<DataResponse<QuotationView>>> {
    let view = usecase::compute(&state.pool, &state.config.quotation, project_id).await?;
    Ok(Json(DataResponse::new(view)))
}

/// GET /api/v1/quotations/projects/{project_id}
pub async fn get(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<DataResponse<QuotationView>>> {
    let view = usecase::get(&state.pool, project_id).await?;
    Ok(Json(DataResponse::new(view)))
}

/// PUT /api/v1/quotations/projects/{project_id}
pub async fn update(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
    Json(input): Json<UpdateQuotation>,
) -> AppResult<Json<DataResponse<QuotationView>>> {
    let view = usecase::update(&state.pool, project_id, &input).await?;
    Ok(Json(DataResponse::new(view)))
}

/// PUT /api/v1/quotations/projects/{project_id}/approve
pub async fn approve(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Quotation>>> {
    let quotation = usecase::approve(&state.pool, project_id).await?;
    Ok(Json(DataResponse::new(quotation)))
}

/// GET /api/v1/quotations/projects/{project_id}/export
pub async fn export(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<DataResponse<QuotationExport>>> {
    let export = usecase::export(&state.pool, project_id).await?;
    Ok(Json(DataResponse::new(export)))
}
