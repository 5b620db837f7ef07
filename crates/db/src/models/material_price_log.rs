//! Material price history. Rows are append-only.

use bidflow_core::types::{DbId, Timestamp};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `material_price_logs` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MaterialPriceLog {
    pub id: DbId,
    pub material_id: DbId,
    pub boq_id: DbId,
    pub job_id: DbId,
    pub purchase_order: Option<String>,
    pub quantity: Decimal,
    pub estimated_price: Decimal,
    pub actual_price: Option<Decimal>,
    pub sale_price: Option<Decimal>,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateMaterialPriceLog {
    pub material_id: DbId,
    pub boq_id: DbId,
    pub job_id: DbId,
    pub purchase_order: Option<String>,
    pub quantity: Option<Decimal>,
    pub estimated_price: Decimal,
    pub actual_price: Option<Decimal>,
    pub sale_price: Option<Decimal>,
}

/// Per-job aggregate of actual prices, used by the project summary.
#[derive(Debug, Clone, FromRow)]
pub struct JobActualPriceRow {
    pub job_id: DbId,
    pub job_name: String,
    pub actual_material_cost: Decimal,
    pub missing_prices: i64,
}

impl From<JobActualPriceRow> for bidflow_core::project_summary::JobActuals {
    fn from(row: JobActualPriceRow) -> Self {
        Self {
            job_id: row.job_id,
            job_name: row.job_name,
            actual_material_cost: row.actual_material_cost,
            missing_prices: row.missing_prices,
        }
    }
}
