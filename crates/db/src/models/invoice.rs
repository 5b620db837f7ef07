//! Invoice models and DTOs.

use bidflow_core::status::DocumentStatus;
use bidflow_core::types::{Date, DbId, Timestamp};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `invoices` table joined with its period.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Invoice {
    pub id: DbId,
    pub project_id: DbId,
    pub period_id: DbId,
    pub period_number: i32,
    pub amount: Decimal,
    #[sqlx(try_from = "String")]
    pub status: DocumentStatus,
    pub invoice_date: Option<Date>,
    pub payment_due_date: Option<Date>,
    pub payment_term: Option<String>,
    pub paid_date: Option<Date>,
    pub remarks: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Request body for `POST /invoices/{project_id}`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateInvoiceBatch {
    pub contract_id: DbId,
    #[validate(length(max = 255))]
    pub payment_term: Option<String>,
}

/// Partial update of invoice fields. At least one field must be present.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateInvoice {
    pub invoice_date: Option<Date>,
    pub payment_due_date: Option<Date>,
    #[validate(length(max = 255))]
    pub payment_term: Option<String>,
    pub paid_date: Option<Date>,
    #[validate(length(max = 2000))]
    pub remarks: Option<String>,
}

impl UpdateInvoice {
    pub fn is_empty(&self) -> bool {
        self.invoice_date.is_none()
            && self.payment_due_date.is_none()
            && self.payment_term.is_none()
            && self.paid_date.is_none()
            && self.remarks.is_none()
    }
}

/// Request body for `PUT /invoices/{id}/status`.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateInvoiceStatus {
    pub status: DocumentStatus,
}
