//! BOQ access and draft editing.
//!
//! Every edit locks the BOQ row and checks that it is still draft, so an
//! approval that commits first freezes the lines for all later edits.

use bidflow_core::error::CoreError;
use bidflow_core::money::validate_non_negative;
use bidflow_core::status::{ensure_boq_editable, validate_boq_approval};
use bidflow_core::types::DbId;
use bidflow_db::models::boq::{
    Boq, BoqJob, BoqWithJobs, CreateBoqJob, UpdateBoq, UpdateBoqJob,
};
use bidflow_db::repositories::{BoqRepo, ProjectRepo};
use bidflow_db::DbPool;
use sqlx::PgConnection;

use crate::error::{AppError, AppResult};

/// Return the project's BOQ with its job lines, creating a draft BOQ on
/// first access.
pub async fn get_or_create_for_project(pool: &DbPool, project_id: DbId) -> AppResult<BoqWithJobs> {
    let mut tx = pool.begin().await?;

    ProjectRepo::find_by_id(&mut *tx, project_id)
        .await?
        .ok_or(AppError::not_found("Project", project_id))?;
    let boq = BoqRepo::get_or_create_for_project(&mut tx, project_id).await?;
    let jobs = BoqRepo::list_jobs(&mut *tx, boq.id).await?;

    tx.commit().await?;
    Ok(BoqWithJobs { boq, jobs })
}

pub async fn get(pool: &DbPool, boq_id: DbId) -> AppResult<BoqWithJobs> {
    let boq = BoqRepo::find_by_id(pool, boq_id)
        .await?
        .ok_or(AppError::not_found("Boq", boq_id))?;
    let jobs = BoqRepo::list_jobs(pool, boq.id).await?;
    Ok(BoqWithJobs { boq, jobs })
}

pub async fn update(pool: &DbPool, boq_id: DbId, input: &UpdateBoq) -> AppResult<Boq> {
    if let Some(cost) = input.selling_general_cost {
        validate_non_negative(cost, "selling_general_cost")?;
    }
    if input.complete_step.is_some_and(|step| step < 0) {
        return Err(CoreError::Validation("complete_step must not be negative".to_string()).into());
    }

    let mut tx = pool.begin().await?;
    lock_editable(&mut tx, boq_id).await?;
    let boq = BoqRepo::update(&mut *tx, boq_id, input)
        .await?
        .ok_or(AppError::not_found("Boq", boq_id))?;
    tx.commit().await?;
    Ok(boq)
}

/// Approve a draft BOQ. Approving twice fails.
pub async fn approve(pool: &DbPool, boq_id: DbId) -> AppResult<Boq> {
    let mut tx = pool.begin().await?;

    let current = lock(&mut tx, boq_id).await?;
    validate_boq_approval(current.status)?;
    let boq = BoqRepo::approve(&mut *tx, boq_id)
        .await?
        .ok_or_else(|| CoreError::InvalidTransition("boq is already approved".to_string()))?;
    tx.commit().await?;

    tracing::info!(%boq_id, project_id = %boq.project_id, "BOQ approved");
    Ok(boq)
}

pub async fn add_job(pool: &DbPool, boq_id: DbId, input: &CreateBoqJob) -> AppResult<BoqJob> {
    validate_line(Some(input.quantity), Some(input.labor_cost), input.selling_price)?;

    let mut tx = pool.begin().await?;
    lock_editable(&mut tx, boq_id).await?;
    let job = BoqRepo::add_job(&mut *tx, boq_id, input).await?;
    tx.commit().await?;
    Ok(job)
}

pub async fn update_job(
    pool: &DbPool,
    boq_id: DbId,
    boq_job_id: DbId,
    input: &UpdateBoqJob,
) -> AppResult<BoqJob> {
    validate_line(input.quantity, input.labor_cost, input.selling_price)?;

    let mut tx = pool.begin().await?;
    lock_editable(&mut tx, boq_id).await?;
    let job = BoqRepo::update_job(&mut *tx, boq_id, boq_job_id, input)
        .await?
        .ok_or(AppError::not_found("BoqJob", boq_job_id))?;
    tx.commit().await?;
    Ok(job)
}

pub async fn remove_job(pool: &DbPool, boq_id: DbId, boq_job_id: DbId) -> AppResult<()> {
    let mut tx = pool.begin().await?;
    lock_editable(&mut tx, boq_id).await?;
    if !BoqRepo::delete_job(&mut *tx, boq_id, boq_job_id).await? {
        return Err(AppError::not_found("BoqJob", boq_job_id));
    }
    tx.commit().await?;
    Ok(())
}

/// Lock a BOQ row for the rest of the transaction.
pub(crate) async fn lock(conn: &mut PgConnection, boq_id: DbId) -> AppResult<Boq> {
    BoqRepo::find_by_id_for_update(&mut *conn, boq_id)
        .await?
        .ok_or(AppError::not_found("Boq", boq_id))
}

async fn lock_editable(conn: &mut PgConnection, boq_id: DbId) -> AppResult<Boq> {
    let boq = lock(conn, boq_id).await?;
    ensure_boq_editable(boq.status)?;
    Ok(boq)
}

fn validate_line(
    quantity: Option<rust_decimal::Decimal>,
    labor_cost: Option<rust_decimal::Decimal>,
    selling_price: Option<rust_decimal::Decimal>,
) -> Result<(), CoreError> {
    if let Some(q) = quantity {
        validate_non_negative(q, "quantity")?;
    }
    if let Some(l) = labor_cost {
        validate_non_negative(l, "labor_cost")?;
    }
    if let Some(s) = selling_price {
        validate_non_negative(s, "selling_price")?;
    }
    Ok(())
}
