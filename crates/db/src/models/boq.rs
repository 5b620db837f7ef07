//! BOQ (bill of quantities) models and DTOs.

use bidflow_core::status::DocumentStatus;
use bidflow_core::types::{DbId, Timestamp};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `boqs` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Boq {
    pub id: DbId,
    pub project_id: DbId,
    #[sqlx(try_from = "String")]
    pub status: DocumentStatus,
    pub selling_general_cost: Option<Decimal>,
    pub complete_step: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for editing a draft BOQ. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateBoq {
    pub selling_general_cost: Option<Decimal>,
    pub complete_step: Option<i32>,
}

/// A `boq_jobs` row joined with its catalog job name and unit.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct BoqJob {
    pub id: DbId,
    pub boq_id: DbId,
    pub job_id: DbId,
    pub job_name: String,
    pub unit: String,
    pub quantity: Decimal,
    pub labor_cost: Decimal,
    pub selling_price: Option<Decimal>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for adding a job line to a BOQ.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateBoqJob {
    pub job_id: DbId,
    pub quantity: Decimal,
    pub labor_cost: Decimal,
    pub selling_price: Option<Decimal>,
}

/// DTO for editing a BOQ job line. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateBoqJob {
    pub quantity: Option<Decimal>,
    pub labor_cost: Option<Decimal>,
    pub selling_price: Option<Decimal>,
}

/// Response payload for the get-or-create endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct BoqWithJobs {
    #[serde(flatten)]
    pub boq: Boq,
    pub jobs: Vec<BoqJob>,
}
