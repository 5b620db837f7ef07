//! Quotation models and the derived views built from them.

use bidflow_core::quotation::{DocumentAmount, LineInput, QuotationLine, QuotationTotals};
use bidflow_core::status::DocumentStatus;
use bidflow_core::types::{DbId, Timestamp};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `quotations` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Quotation {
    pub id: DbId,
    pub project_id: DbId,
    #[sqlx(try_from = "String")]
    pub status: DocumentStatus,
    pub valid_date: Timestamp,
    pub tax_percentage: Decimal,
    pub final_amount: Option<Decimal>,
    /// Set on approval. Price logs recorded later no longer move the lines.
    pub approved_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for editing a draft quotation. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateQuotation {
    pub valid_date: Option<Timestamp>,
    pub tax_percentage: Option<Decimal>,
}

/// One BOQ job joined with its catalog entry and summed material estimates.
#[derive(Debug, Clone, FromRow)]
pub struct QuotationLineRow {
    pub boq_job_id: DbId,
    pub job_id: DbId,
    pub job_name: String,
    pub unit: String,
    pub quantity: Decimal,
    pub labor_cost: Decimal,
    pub selling_price: Option<Decimal>,
    pub total_material_cost: Option<Decimal>,
}

impl From<QuotationLineRow> for LineInput {
    fn from(row: QuotationLineRow) -> Self {
        Self {
            boq_job_id: row.boq_job_id,
            job_id: row.job_id,
            job_name: row.job_name,
            unit: row.unit,
            quantity: row.quantity,
            labor_cost: row.labor_cost,
            selling_price: row.selling_price,
            total_material_cost: row.total_material_cost,
        }
    }
}

/// Quotation with its lines recomputed from the current BOQ.
#[derive(Debug, Clone, Serialize)]
pub struct QuotationView {
    pub quotation: Quotation,
    pub lines: Vec<QuotationLine>,
    pub totals: QuotationTotals,
}

/// Project and client header fields for a quotation document.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct QuotationExportHeader {
    pub project_id: DbId,
    pub project_name: String,
    pub project_address: Option<String>,
    pub client_name: Option<String>,
    pub client_address: Option<String>,
    pub client_email: Option<String>,
    pub client_phone: Option<String>,
    pub client_tax_id: Option<String>,
}

/// Flat projection handed to document generation.
#[derive(Debug, Clone, Serialize)]
pub struct QuotationExport {
    #[serde(flatten)]
    pub header: QuotationExportHeader,
    pub quotation_id: DbId,
    pub valid_date: Timestamp,
    pub lines: Vec<QuotationLine>,
    pub totals: QuotationTotals,
    pub amount: DocumentAmount,
}
