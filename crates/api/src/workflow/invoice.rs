//! Period-based invoice generation and the invoice lifecycle.

use bidflow_core::error::CoreError;
use bidflow_core::invoice::{
    periods_to_invoice, validate_batch_preconditions, validate_dates, validate_status_change,
    ApprovalFields, BatchPreconditions,
};
use bidflow_core::status::DocumentStatus;
use bidflow_core::types::DbId;
use bidflow_db::models::invoice::{CreateInvoiceBatch, Invoice, UpdateInvoice};
use bidflow_db::repositories::{InvoiceRepo, PeriodRepo, ProjectRepo};
use bidflow_db::DbPool;
use validator::Validate;

use crate::error::{AppError, AppResult};

use super::lock_project;

/// Create one draft invoice for every period of the contract that has none.
///
/// Preconditions are checked in order under the project lock and the first
/// failure wins. The inserts share one transaction, so either every
/// available period gets an invoice or none does.
pub async fn create_for_all_periods(
    pool: &DbPool,
    project_id: DbId,
    input: &CreateInvoiceBatch,
) -> AppResult<Vec<Invoice>> {
    input.validate()?;

    let mut tx = pool.begin().await?;

    let snapshot = lock_project(&mut tx, project_id).await?;
    let periods = match snapshot.contract_id {
        Some(id) if id == input.contract_id => PeriodRepo::list_by_contract(&mut *tx, id).await?,
        _ => Vec::new(),
    };
    validate_batch_preconditions(&BatchPreconditions {
        project: snapshot.project_status,
        boq: snapshot.boq()?,
        quotation: snapshot.quotation()?,
        stored_contract_id: snapshot.contract_id,
        requested_contract_id: input.contract_id,
        period_count: periods.len(),
    })?;

    let period_ids: Vec<DbId> = periods.iter().map(|p| p.id).collect();
    let invoiced = InvoiceRepo::invoiced_period_ids(&mut *tx, input.contract_id).await?;
    let pending = periods_to_invoice(&period_ids, &invoiced)?;

    let invoices = InvoiceRepo::create_for_periods(
        &mut tx,
        project_id,
        &pending,
        input.payment_term.as_deref(),
    )
    .await?;
    tx.commit().await?;

    tracing::info!(
        %project_id,
        contract_id = %input.contract_id,
        created = invoices.len(),
        skipped = invoiced.len(),
        "Invoices created for contract periods"
    );
    Ok(invoices)
}

pub async fn get(pool: &DbPool, id: DbId) -> AppResult<Invoice> {
    InvoiceRepo::find_by_id(pool, id)
        .await?
        .ok_or(AppError::not_found("Invoice", id))
}

pub async fn list_by_project(pool: &DbPool, project_id: DbId) -> AppResult<Vec<Invoice>> {
    ProjectRepo::find_by_id(pool, project_id)
        .await?
        .ok_or(AppError::not_found("Project", project_id))?;
    Ok(InvoiceRepo::list_by_project(pool, project_id).await?)
}

/// Apply a partial field update. An empty update is rejected.
pub async fn update(pool: &DbPool, id: DbId, input: &UpdateInvoice) -> AppResult<Invoice> {
    if input.is_empty() {
        return Err(CoreError::Validation("no fields to update".to_string()).into());
    }
    input.validate()?;

    let mut tx = pool.begin().await?;
    let current = InvoiceRepo::find_by_id_for_update(&mut *tx, id)
        .await?
        .ok_or(AppError::not_found("Invoice", id))?;
    validate_dates(
        input.invoice_date.or(current.invoice_date),
        input.payment_due_date.or(current.payment_due_date),
    )?;

    let invoice = InvoiceRepo::update(&mut *tx, id, input)
        .await?
        .ok_or(AppError::not_found("Invoice", id))?;
    tx.commit().await?;
    Ok(invoice)
}

/// Change the invoice status. Forward only; approval needs invoice date,
/// due date and payment term. Setting the current status again is a no-op.
pub async fn update_status(pool: &DbPool, id: DbId, target: DocumentStatus) -> AppResult<Invoice> {
    let mut tx = pool.begin().await?;
    let current = InvoiceRepo::find_by_id_for_update(&mut *tx, id)
        .await?
        .ok_or(AppError::not_found("Invoice", id))?;

    validate_status_change(
        current.status,
        target,
        ApprovalFields {
            invoice_date: current.invoice_date,
            payment_due_date: current.payment_due_date,
            payment_term: current.payment_term.as_deref(),
        },
    )?;
    if current.status == target {
        return Ok(current);
    }

    let invoice = InvoiceRepo::update_status(&mut *tx, id, target)
        .await?
        .ok_or(AppError::not_found("Invoice", id))?;
    tx.commit().await?;

    tracing::info!(
        invoice_id = %id,
        from = %current.status,
        to = %target,
        "Invoice status changed"
    );
    Ok(invoice)
}

/// Delete an invoice regardless of its status.
pub async fn delete(pool: &DbPool, id: DbId) -> AppResult<()> {
    if !InvoiceRepo::delete(pool, id).await? {
        return Err(AppError::not_found("Invoice", id));
    }
    tracing::info!(invoice_id = %id, "Invoice deleted");
    Ok(())
}
