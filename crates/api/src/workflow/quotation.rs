//! Quotation create-or-get, approval and export.
//!
//! Lines are never stored. Every read recomputes them from the BOQ and its
//! material price logs. Approval records `final_amount` and `approved_at`;
//! after that only price logs recorded up to `approved_at` are priced, so
//! reads and exports of an approved quotation keep the approved numbers.

use bidflow_core::error::CoreError;
use bidflow_core::quotation::{
    apply_tax, compute_line, compute_totals, validate_tax_percentage, QuotationDefaults,
};
use bidflow_core::status::{ensure_boq_approved, ensure_quotation_editable, DocumentStatus};
use bidflow_core::types::DbId;
use bidflow_db::models::boq::Boq;
use bidflow_db::models::quotation::{Quotation, QuotationExport, QuotationView, UpdateQuotation};
use bidflow_db::repositories::{BoqRepo, GeneralCostRepo, QuotationRepo};
use bidflow_db::DbPool;
use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::PgConnection;

use crate::error::{AppError, AppResult};

use super::lock_project;

const NO_DRAFT_TO_APPROVE: &str = "no draft quotation found to approve";

/// Compute the project's quotation, creating the draft row on first call.
///
/// This is the only place a quotation is created. The BOQ must be approved.
pub async fn compute(
    pool: &DbPool,
    defaults: &QuotationDefaults,
    project_id: DbId,
) -> AppResult<QuotationView> {
    let mut tx = pool.begin().await?;

    lock_project(&mut tx, project_id).await?;
    let boq = approved_boq(&mut tx, project_id).await?;

    let valid_date = defaults.valid_date_from(Utc::now())?;
    let quotation = QuotationRepo::get_or_create_for_project(
        &mut tx,
        project_id,
        defaults.tax_percentage,
        valid_date,
    )
    .await?;
    let view = build_view(&mut tx, quotation, &boq).await?;

    tx.commit().await?;
    Ok(view)
}

/// Read the current quotation view without creating anything.
pub async fn get(pool: &DbPool, project_id: DbId) -> AppResult<QuotationView> {
    let mut conn = pool.acquire().await?;
    let quotation = find(&mut conn, project_id).await?;
    let boq = BoqRepo::find_by_project(&mut *conn, project_id)
        .await?
        .ok_or_else(|| CoreError::Missing("boq not found for project".to_string()))?;
    build_view(&mut conn, quotation, &boq).await
}

/// Update validity date and tax while the quotation is draft.
pub async fn update(
    pool: &DbPool,
    project_id: DbId,
    input: &UpdateQuotation,
) -> AppResult<QuotationView> {
    if let Some(tax) = input.tax_percentage {
        validate_tax_percentage(tax)?;
    }

    let mut tx = pool.begin().await?;
    lock_project(&mut tx, project_id).await?;
    let current = find(&mut tx, project_id).await?;
    ensure_quotation_editable(current.status)?;

    let quotation = QuotationRepo::update(&mut *tx, current.id, input)
        .await?
        .ok_or(AppError::not_found("Quotation", current.id))?;
    let boq = BoqRepo::find_by_project(&mut *tx, project_id)
        .await?
        .ok_or_else(|| CoreError::Missing("boq not found for project".to_string()))?;
    let view = build_view(&mut tx, quotation, &boq).await?;

    tx.commit().await?;
    Ok(view)
}

/// Approve the project's draft quotation and store its final amount.
///
/// The BOQ is re-checked under the project lock. A second approval fails
/// with "no draft quotation found to approve".
pub async fn approve(pool: &DbPool, project_id: DbId) -> AppResult<Quotation> {
    let mut tx = pool.begin().await?;

    lock_project(&mut tx, project_id).await?;
    let boq = approved_boq(&mut tx, project_id).await?;
    let current = QuotationRepo::find_by_project(&mut *tx, project_id)
        .await?
        .filter(|q| q.status == DocumentStatus::Draft)
        .ok_or_else(|| CoreError::Missing(NO_DRAFT_TO_APPROVE.to_string()))?;

    let tax_percentage = current.tax_percentage;
    let view = build_view(&mut tx, current, &boq).await?;
    let amount = apply_tax(view.totals.selling_total, tax_percentage);

    let quotation = QuotationRepo::approve(&mut *tx, project_id, amount.final_amount)
        .await?
        .ok_or_else(|| CoreError::Missing(NO_DRAFT_TO_APPROVE.to_string()))?;
    tx.commit().await?;

    tracing::info!(
        %project_id,
        quotation_id = %quotation.id,
        final_amount = %amount.final_amount,
        "Quotation approved"
    );
    Ok(quotation)
}

/// Flat projection of an approved quotation for document generation.
pub async fn export(pool: &DbPool, project_id: DbId) -> AppResult<QuotationExport> {
    let mut conn = pool.acquire().await?;

    let quotation = find(&mut conn, project_id).await?;
    if !quotation.status.is_approved() {
        return Err(CoreError::InvalidState("quotation is not approved".to_string()).into());
    }
    let header = QuotationRepo::export_header(&mut *conn, project_id)
        .await?
        .ok_or(AppError::not_found("Project", project_id))?;
    let boq = BoqRepo::find_by_project(&mut *conn, project_id)
        .await?
        .ok_or_else(|| CoreError::Missing("boq not found for project".to_string()))?;

    let quotation_id = quotation.id;
    let valid_date = quotation.valid_date;
    let tax_percentage = quotation.tax_percentage;
    let stored_amount = quotation.final_amount;
    let view = build_view(&mut conn, quotation, &boq).await?;

    let mut amount = apply_tax(view.totals.selling_total, tax_percentage);
    if let Some(final_amount) = stored_amount {
        if final_amount != amount.final_amount {
            tracing::warn!(
                %project_id,
                stored = %final_amount,
                computed = %amount.final_amount,
                "Approved quotation total differs from its frozen lines"
            );
        }
        amount.final_amount = final_amount;
    }

    Ok(QuotationExport {
        header,
        quotation_id,
        valid_date,
        amount,
        lines: view.lines,
        totals: view.totals,
    })
}

async fn find(conn: &mut PgConnection, project_id: DbId) -> AppResult<Quotation> {
    QuotationRepo::find_by_project(&mut *conn, project_id)
        .await?
        .ok_or_else(|| CoreError::Missing("quotation not found for project".to_string()).into())
}

async fn approved_boq(conn: &mut PgConnection, project_id: DbId) -> AppResult<Boq> {
    let boq = BoqRepo::find_by_project(&mut *conn, project_id)
        .await?
        .ok_or_else(|| CoreError::InvalidState("boq is not approved".to_string()))?;
    ensure_boq_approved(boq.status)?;
    Ok(boq)
}

/// Price every BOQ line and total them with the BOQ's general costs.
///
/// An approved quotation is priced as of its approval.
async fn build_view(
    conn: &mut PgConnection,
    quotation: Quotation,
    boq: &Boq,
) -> AppResult<QuotationView> {
    let lines: Vec<_> = QuotationRepo::line_rows(&mut *conn, boq.id, quotation.approved_at)
        .await?
        .into_iter()
        .map(|row| compute_line(&row.into()))
        .collect();
    let estimates: Vec<Decimal> = GeneralCostRepo::list_by_boq(&mut *conn, boq.id)
        .await?
        .into_iter()
        .map(|g| g.estimated_cost)
        .collect();
    let totals = compute_totals(&lines, &estimates, boq.selling_general_cost);

    Ok(QuotationView {
        quotation,
        lines,
        totals,
    })
}
