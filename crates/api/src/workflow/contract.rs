//! Contracts and their payment periods.

use bidflow_core::error::CoreError;
use bidflow_core::money::validate_non_negative;
use bidflow_core::types::DbId;
use bidflow_db::models::contract::{Contract, CreateContract, CreatePeriod, PeriodWithJobs};
use bidflow_db::repositories::{BoqRepo, ContractRepo, PeriodRepo, ProjectRepo};
use bidflow_db::DbPool;

use crate::error::{AppError, AppResult};

/// Create the project's contract. A second contract conflicts.
pub async fn create(
    pool: &DbPool,
    project_id: DbId,
    input: &CreateContract,
) -> AppResult<Contract> {
    ProjectRepo::find_by_id(pool, project_id)
        .await?
        .ok_or(AppError::not_found("Project", project_id))?;
    let contract = ContractRepo::create(pool, project_id, input).await?;
    tracing::info!(%project_id, contract_id = %contract.id, "Contract created");
    Ok(contract)
}

pub async fn get_for_project(pool: &DbPool, project_id: DbId) -> AppResult<Contract> {
    ContractRepo::find_by_project(pool, project_id)
        .await?
        .ok_or_else(|| CoreError::Missing("contract not found for project".to_string()).into())
}

/// Add a period with its job apportionment in one transaction.
///
/// Apportioned lines must belong to the BOQ of the contract's project.
pub async fn create_period(
    pool: &DbPool,
    contract_id: DbId,
    input: &CreatePeriod,
) -> AppResult<PeriodWithJobs> {
    if input.period_number <= 0 {
        return Err(CoreError::Validation("period_number must be positive".to_string()).into());
    }
    validate_non_negative(input.amount, "amount")?;
    for job in &input.jobs {
        validate_non_negative(job.amount, "jobs.amount")?;
    }

    let mut tx = pool.begin().await?;
    let contract = ContractRepo::find_by_id(&mut *tx, contract_id)
        .await?
        .ok_or(AppError::not_found("Contract", contract_id))?;

    if !input.jobs.is_empty() {
        let boq = BoqRepo::find_by_project(&mut *tx, contract.project_id).await?;
        let boq_job_ids: Vec<DbId> = match boq {
            Some(boq) => BoqRepo::list_jobs(&mut *tx, boq.id)
                .await?
                .into_iter()
                .map(|j| j.id)
                .collect(),
            None => Vec::new(),
        };
        if let Some(stray) = input.jobs.iter().find(|j| !boq_job_ids.contains(&j.boq_job_id)) {
            return Err(CoreError::Validation(format!(
                "boq job {} does not belong to the project's boq",
                stray.boq_job_id
            ))
            .into());
        }
    }

    let period = PeriodRepo::create(&mut tx, contract_id, input).await?;
    tx.commit().await?;

    tracing::info!(
        %contract_id,
        period_number = period.period.period_number,
        jobs = period.jobs.len(),
        "Period created"
    );
    Ok(period)
}

/// Periods of a contract in period order, each with its job apportionment.
pub async fn list_periods(pool: &DbPool, contract_id: DbId) -> AppResult<Vec<PeriodWithJobs>> {
    ContractRepo::find_by_id(pool, contract_id)
        .await?
        .ok_or(AppError::not_found("Contract", contract_id))?;

    let mut result = Vec::new();
    for period in PeriodRepo::list_by_contract(pool, contract_id).await? {
        let jobs = PeriodRepo::list_jobs(pool, period.id).await?;
        result.push(PeriodWithJobs { period, jobs });
    }
    Ok(result)
}
