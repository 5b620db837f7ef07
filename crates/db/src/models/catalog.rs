//! Catalog models: jobs, materials and the quantities linking them.

use bidflow_core::types::{DbId, Timestamp};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `jobs` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Job {
    pub id: DbId,
    pub name: String,
    pub unit: String,
    pub description: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateJob {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(length(min = 1, max = 20))]
    pub unit: String,
    pub description: Option<String>,
}

/// A row from the `materials` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Material {
    pub id: DbId,
    pub name: String,
    pub unit: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateMaterial {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(length(min = 1, max = 20))]
    pub unit: String,
}

/// A row from the `job_materials` join table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct JobMaterial {
    pub job_id: DbId,
    pub material_id: DbId,
    pub quantity: Decimal,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateJobMaterial {
    pub material_id: DbId,
    pub quantity: Decimal,
}
