//! Project status transitions and read-only aggregations.

use bidflow_core::error::CoreError;
use bidflow_core::project_summary::{summarize, GeneralCostAmounts, JobActuals, ProjectSummary};
use bidflow_core::quotation::{compute_line, compute_totals, QuotationLine, QuotationTotals};
use bidflow_core::status::{
    validate_project_transition, DocumentStatus, ProjectDependencies, ProjectStatus,
};
use bidflow_core::types::{DbId, Timestamp};
use bidflow_db::models::project::Project;
use bidflow_db::repositories::{
    BoqRepo, ClientRepo, ContractRepo, GeneralCostRepo, InvoiceRepo, MaterialPriceLogRepo,
    PeriodRepo, ProjectRepo, QuotationRepo,
};
use bidflow_db::DbPool;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::{AppError, AppResult};

use super::lock_project;

/// Move a project to `target`, checking the transition table and the status
/// of its BOQ and quotation under a row lock.
pub async fn update_status(
    pool: &DbPool,
    project_id: DbId,
    target: ProjectStatus,
) -> AppResult<Project> {
    let mut tx = pool.begin().await?;

    let snapshot = lock_project(&mut tx, project_id).await?;
    let deps = ProjectDependencies {
        boq: snapshot.boq()?,
        quotation: snapshot.quotation()?,
    };
    validate_project_transition(snapshot.project_status, target, deps)?;

    let project = ProjectRepo::update_status(&mut *tx, project_id, target)
        .await?
        .ok_or(AppError::not_found("Project", project_id))?;
    tx.commit().await?;

    tracing::info!(
        %project_id,
        from = %snapshot.project_status,
        to = %target,
        "Project status changed"
    );
    Ok(project)
}

/// Draft and approved invoice counts of a project.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct InvoiceCounts {
    pub draft: usize,
    pub approved: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProjectOverview {
    pub project: Project,
    pub client_name: Option<String>,
    pub boq_status: Option<DocumentStatus>,
    pub quotation_status: Option<DocumentStatus>,
    pub quotation_final_amount: Option<Decimal>,
    /// Quotation totals recomputed from the BOQ, priced as of approval once
    /// the quotation is approved.
    pub totals: Option<QuotationTotals>,
    pub contract_id: Option<DbId>,
    pub period_count: usize,
    pub invoices: InvoiceCounts,
}

pub async fn overview(pool: &DbPool, project_id: DbId) -> AppResult<ProjectOverview> {
    let project = ProjectRepo::find_by_id(pool, project_id)
        .await?
        .ok_or(AppError::not_found("Project", project_id))?;

    let client_name = match project.client_id {
        Some(client_id) => ClientRepo::find_by_id(pool, client_id)
            .await?
            .map(|c| c.name),
        None => None,
    };

    let quotation = QuotationRepo::find_by_project(pool, project_id).await?;
    let approved_at = quotation.as_ref().and_then(|q| q.approved_at);

    let boq = BoqRepo::find_by_project(pool, project_id).await?;
    let totals = match &boq {
        Some(boq) => {
            let lines = priced_lines(pool, boq.id, approved_at).await?;
            let estimates: Vec<Decimal> = GeneralCostRepo::list_by_boq(pool, boq.id)
                .await?
                .into_iter()
                .map(|g| g.estimated_cost)
                .collect();
            Some(compute_totals(&lines, &estimates, boq.selling_general_cost))
        }
        None => None,
    };

    let contract = ContractRepo::find_by_project(pool, project_id).await?;
    let period_count = match &contract {
        Some(c) => PeriodRepo::list_by_contract(pool, c.id).await?.len(),
        None => 0,
    };

    let mut invoices = InvoiceCounts::default();
    for invoice in InvoiceRepo::list_by_project(pool, project_id).await? {
        match invoice.status {
            DocumentStatus::Draft => invoices.draft += 1,
            DocumentStatus::Approved => invoices.approved += 1,
        }
    }

    Ok(ProjectOverview {
        project,
        client_name,
        boq_status: boq.map(|b| b.status),
        quotation_status: quotation.as_ref().map(|q| q.status),
        quotation_final_amount: quotation.and_then(|q| q.final_amount),
        totals,
        contract_id: contract.map(|c| c.id),
        period_count,
        invoices,
    })
}

/// Estimated versus actual cost of a project.
///
/// Revenue is the approved quotation's `final_amount`, or the current
/// selling total while the quotation is not yet approved.
pub async fn summary(pool: &DbPool, project_id: DbId) -> AppResult<ProjectSummary> {
    ProjectRepo::find_by_id(pool, project_id)
        .await?
        .ok_or(AppError::not_found("Project", project_id))?;
    let boq = BoqRepo::find_by_project(pool, project_id)
        .await?
        .ok_or_else(|| CoreError::Missing("boq not found for project".to_string()))?;

    let quotation = QuotationRepo::find_by_project(pool, project_id).await?;
    let lines = priced_lines(pool, boq.id, quotation.as_ref().and_then(|q| q.approved_at)).await?;
    let actuals: Vec<JobActuals> = MaterialPriceLogRepo::job_actuals(pool, boq.id)
        .await?
        .into_iter()
        .map(JobActuals::from)
        .collect();
    let general: Vec<GeneralCostAmounts> = GeneralCostRepo::list_by_boq(pool, boq.id)
        .await?
        .into_iter()
        .map(|g| GeneralCostAmounts {
            estimated: g.estimated_cost,
            actual: g.actual_cost,
        })
        .collect();

    let revenue = match quotation.and_then(|q| q.final_amount) {
        Some(amount) => amount,
        None => {
            let estimates: Vec<Decimal> = general.iter().map(|g| g.estimated).collect();
            compute_totals(&lines, &estimates, boq.selling_general_cost).selling_total
        }
    };

    Ok(summarize(&lines, &actuals, &general, revenue)?)
}

async fn priced_lines(
    pool: &DbPool,
    boq_id: DbId,
    as_of: Option<Timestamp>,
) -> AppResult<Vec<QuotationLine>> {
    Ok(QuotationRepo::line_rows(pool, boq_id, as_of)
        .await?
        .into_iter()
        .map(|row| compute_line(&row.into()))
        .collect())
}
