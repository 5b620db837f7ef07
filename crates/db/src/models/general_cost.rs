//! General-cost type catalog and per-BOQ general cost rows.

use bidflow_core::types::{DbId, Timestamp};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `types` catalog.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CostType {
    pub name: String,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateCostType {
    pub name: String,
}

/// A row from the `general_costs` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct GeneralCost {
    pub id: DbId,
    pub boq_id: DbId,
    pub type_name: String,
    pub estimated_cost: Decimal,
    pub actual_cost: Decimal,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for adding a general cost of a specific type to a BOQ.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateGeneralCost {
    pub type_name: String,
    pub estimated_cost: Option<Decimal>,
}

/// Request body for the estimated/actual cost endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateCostValue {
    pub value: Decimal,
}
