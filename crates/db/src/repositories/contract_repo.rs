//! Repositories for `contracts`, `periods` and `job_periods`.

use bidflow_core::types::DbId;
use sqlx::{PgConnection, PgExecutor};

use crate::models::contract::{
    Contract, CreateContract, CreatePeriod, JobPeriod, Period, PeriodWithJobs,
};

const CONTRACT_COLUMNS: &str =
    "id, project_id, contract_number, signed_date, created_at, updated_at";
const PERIOD_COLUMNS: &str =
    "id, contract_id, period_number, amount, delivery_deadline, created_at";

pub struct ContractRepo;

impl ContractRepo {
    /// A project has at most one contract (`uq_contracts_project`).
    pub async fn create(
        executor: impl PgExecutor<'_>,
        project_id: DbId,
        input: &CreateContract,
    ) -> Result<Contract, sqlx::Error> {
        let query = format!(
            "INSERT INTO contracts (project_id, contract_number, signed_date)
             VALUES ($1, $2, $3)
             RETURNING {CONTRACT_COLUMNS}"
        );
        sqlx::query_as::<_, Contract>(&query)
            .bind(project_id)
            .bind(&input.contract_number)
            .bind(input.signed_date)
            .fetch_one(executor)
            .await
    }

    pub async fn find_by_id(
        executor: impl PgExecutor<'_>,
        id: DbId,
    ) -> Result<Option<Contract>, sqlx::Error> {
        let query = format!("SELECT {CONTRACT_COLUMNS} FROM contracts WHERE id = $1");
        sqlx::query_as::<_, Contract>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    pub async fn find_by_project(
        executor: impl PgExecutor<'_>,
        project_id: DbId,
    ) -> Result<Option<Contract>, sqlx::Error> {
        let query = format!("SELECT {CONTRACT_COLUMNS} FROM contracts WHERE project_id = $1");
        sqlx::query_as::<_, Contract>(&query)
            .bind(project_id)
            .fetch_optional(executor)
            .await
    }
}

pub struct PeriodRepo;

impl PeriodRepo {
    /// Insert a period and its job apportionment. Call inside a transaction.
    pub async fn create(
        conn: &mut PgConnection,
        contract_id: DbId,
        input: &CreatePeriod,
    ) -> Result<PeriodWithJobs, sqlx::Error> {
        let query = format!(
            "INSERT INTO periods (contract_id, period_number, amount, delivery_deadline)
             VALUES ($1, $2, $3, $4)
             RETURNING {PERIOD_COLUMNS}"
        );
        let period = sqlx::query_as::<_, Period>(&query)
            .bind(contract_id)
            .bind(input.period_number)
            .bind(input.amount)
            .bind(input.delivery_deadline)
            .fetch_one(&mut *conn)
            .await?;

        for job in &input.jobs {
            sqlx::query(
                "INSERT INTO job_periods (period_id, boq_job_id, amount) VALUES ($1, $2, $3)",
            )
            .bind(period.id)
            .bind(job.boq_job_id)
            .bind(job.amount)
            .execute(&mut *conn)
            .await?;
        }

        let jobs = Self::list_jobs(&mut *conn, period.id).await?;
        Ok(PeriodWithJobs { period, jobs })
    }

    /// Periods of a contract ordered by period number.
    pub async fn list_by_contract(
        executor: impl PgExecutor<'_>,
        contract_id: DbId,
    ) -> Result<Vec<Period>, sqlx::Error> {
        let query = format!(
            "SELECT {PERIOD_COLUMNS} FROM periods WHERE contract_id = $1 ORDER BY period_number"
        );
        sqlx::query_as::<_, Period>(&query)
            .bind(contract_id)
            .fetch_all(executor)
            .await
    }

    pub async fn list_jobs(
        executor: impl PgExecutor<'_>,
        period_id: DbId,
    ) -> Result<Vec<JobPeriod>, sqlx::Error> {
        sqlx::query_as::<_, JobPeriod>(
            "SELECT boq_job_id, amount FROM job_periods WHERE period_id = $1 ORDER BY boq_job_id",
        )
        .bind(period_id)
        .fetch_all(executor)
        .await
    }
}
