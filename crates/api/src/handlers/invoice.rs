//! Handlers for the `/invoices` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use bidflow_core::types::DbId;
use bidflow_db::models::invoice::{CreateInvoiceBatch, Invoice, UpdateInvoice, UpdateInvoiceStatus};

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;
use crate::workflow::invoice as usecase;

/// POST /api/v1/invoices/{project_id}
///
/// Creates one draft invoice per period of the contract that has none yet.
pub async fn create_for_all_periods(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
    Json(input): Json<CreateInvoiceBatch>,
) -> AppResult<(StatusCode, Json<DataResponse<Vec<Invoice>>>)> {
    let invoices = usecase::create_for_all_periods(&state.pool, project_id, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse::new(invoices))))
}

/// GET /api/v1/invoices/project/{project_id}
pub async fn list_by_project(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<Invoice>>>> {
    let invoices = usecase::list_by_project(&state.pool, project_id).await?;
    Ok(Json(DataResponse::new(invoices)))
}

/// GET /api/v1/invoices/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Invoice>>> {
    let invoice = usecase::get(&state.pool, id).await?;
    Ok(Json(DataResponse::new(invoice)))
}

/// PUT /api/v1/invoices/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateInvoice>,
) -> AppResult<Json<DataResponse<Invoice>>> {
    let invoice = usecase::update(&state.pool, id, &input).await?;
    Ok(Json(DataResponse::new(invoice)))
}

/// PUT /api/v1/invoices/{id}/status
pub async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateInvoiceStatus>,
) -> AppResult<Json<DataResponse<Invoice>>> {
    let invoice = usecase::update_status(&state.pool, id, input.status).await?;
    Ok(Json(DataResponse::new(invoice)))
}

/// DELETE /api/v1/invoices/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    usecase::delete(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
