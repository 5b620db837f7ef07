//! Contract, period and job-period models.

use bidflow_core::types::{Date, DbId, Timestamp};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `contracts` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Contract {
    pub id: DbId,
    pub project_id: DbId,
    pub contract_number: Option<String>,
    pub signed_date: Option<Date>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateContract {
    pub contract_number: Option<String>,
    pub signed_date: Option<Date>,
}

/// A row from the `periods` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Period {
    pub id: DbId,
    pub contract_id: DbId,
    pub period_number: i32,
    pub amount: Decimal,
    pub delivery_deadline: Option<Date>,
    pub created_at: Timestamp,
}

/// Share of a BOQ job's amount assigned to a period.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct JobPeriod {
    pub boq_job_id: DbId,
    pub amount: Decimal,
}

/// DTO for adding a period, optionally apportioning BOQ jobs to it.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePeriod {
    pub period_number: i32,
    pub amount: Decimal,
    pub delivery_deadline: Option<Date>,
    #[serde(default)]
    pub jobs: Vec<JobPeriod>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PeriodWithJobs {
    #[serde(flatten)]
    pub period: Period,
    pub jobs: Vec<JobPeriod>,
}
