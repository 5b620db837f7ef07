//! General-cost synchronization and the estimated/actual update gates.

use bidflow_core::error::CoreError;
use bidflow_core::general_cost::{
    validate_actual_update, validate_estimated_update, validate_type_name,
};
use bidflow_core::money::validate_non_negative;
use bidflow_core::status::ensure_boq_editable;
use bidflow_core::types::DbId;
use bidflow_db::models::general_cost::{CreateGeneralCost, GeneralCost};
use bidflow_db::repositories::{BoqRepo, CostTypeRepo, GeneralCostRepo};
use bidflow_db::DbPool;
use rust_decimal::Decimal;
use sqlx::PgConnection;

use crate::error::{AppError, AppResult};

use super::{boq, lock_project};

/// Ensure the BOQ has one general cost per type and return them all,
/// ordered by type name.
pub async fn ensure_for_boq(pool: &DbPool, boq_id: DbId) -> AppResult<Vec<GeneralCost>> {
    let mut tx = pool.begin().await?;
    BoqRepo::find_by_id(&mut *tx, boq_id)
        .await?
        .ok_or(AppError::not_found("Boq", boq_id))?;
    let costs = GeneralCostRepo::ensure_for_boq(&mut tx, boq_id).await?;
    tx.commit().await?;
    Ok(costs)
}

/// Add a general cost for one type to a draft BOQ.
pub async fn add(pool: &DbPool, boq_id: DbId, input: &CreateGeneralCost) -> AppResult<GeneralCost> {
    validate_type_name(&input.type_name)?;
    if let Some(value) = input.estimated_cost {
        validate_non_negative(value, "estimated_cost")?;
    }

    let mut tx = pool.begin().await?;
    let current = boq::lock(&mut tx, boq_id).await?;
    ensure_boq_editable(current.status)?;
    if !CostTypeRepo::exists(&mut *tx, &input.type_name).await? {
        return Err(CoreError::Missing(format!("type '{}' not found", input.type_name)).into());
    }
    let cost = GeneralCostRepo::create(&mut *tx, boq_id, input).await?;
    tx.commit().await?;
    Ok(cost)
}

/// Set the estimated cost. Only while the BOQ is draft.
pub async fn update_estimated(pool: &DbPool, id: DbId, value: Decimal) -> AppResult<GeneralCost> {
    let mut tx = pool.begin().await?;

    let cost = find(&mut tx, id).await?;
    let current = boq::lock(&mut tx, cost.boq_id).await?;
    validate_estimated_update(value, current.status)?;

    let updated = GeneralCostRepo::update_estimated(&mut *tx, id, value)
        .await?
        .ok_or(AppError::not_found("GeneralCost", id))?;
    tx.commit().await?;

    tracing::debug!(general_cost_id = %id, %value, "Estimated general cost updated");
    Ok(updated)
}

/// Set the actual cost. Requires an approved BOQ and quotation on a project
/// that is not completed.
pub async fn update_actual(pool: &DbPool, id: DbId, value: Decimal) -> AppResult<GeneralCost> {
    let mut tx = pool.begin().await?;

    let cost = find(&mut tx, id).await?;
    let owner = BoqRepo::find_by_id(&mut *tx, cost.boq_id)
        .await?
        .ok_or(AppError::not_found("Boq", cost.boq_id))?;
    // Project before BOQ, the same lock order as every other usecase.
    let project = lock_project(&mut tx, owner.project_id).await?;
    let current = boq::lock(&mut tx, cost.boq_id).await?;
    validate_actual_update(
        value,
        project.project_status,
        current.status,
        project.quotation()?,
    )?;

    let updated = GeneralCostRepo::update_actual(&mut *tx, id, value)
        .await?
        .ok_or(AppError::not_found("GeneralCost", id))?;
    tx.commit().await?;

    tracing::info!(general_cost_id = %id, %value, "Actual general cost recorded");
    Ok(updated)
}

/// Remove a general cost from a draft BOQ.
pub async fn remove(pool: &DbPool, id: DbId) -> AppResult<()> {
    let mut tx = pool.begin().await?;
    let cost = find(&mut tx, id).await?;
    let current = boq::lock(&mut tx, cost.boq_id).await?;
    ensure_boq_editable(current.status)?;
    GeneralCostRepo::delete(&mut *tx, id).await?;
    tx.commit().await?;
    Ok(())
}

async fn find(conn: &mut PgConnection, id: DbId) -> AppResult<GeneralCost> {
    GeneralCostRepo::find_by_id(&mut *conn, id)
        .await?
        .ok_or(AppError::not_found("GeneralCost", id))
}
