//! Quotation arithmetic.
//!
//! A quotation has no stored line items. Each line is derived from a BOQ job
//! and the material price logs recorded against it, so the numbers follow
//! the BOQ until the quotation is approved and `final_amount` is captured.

use chrono::Months;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::CoreError;
use crate::money::{percentage_of, round_money};
use crate::types::{DbId, Timestamp};

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

/// Tax applied to a new quotation unless overridden (7%).
pub const DEFAULT_TAX_PERCENTAGE: Decimal = Decimal::from_parts(7, 0, 0, false, 0);

/// Months a new quotation stays valid unless overridden.
pub const DEFAULT_VALIDITY_MONTHS: u32 = 1;

/// Values applied when a quotation row is first created.
///
/// Defaults come from the constants above; the server overrides them from
/// `QUOTATION_TAX_PERCENTAGE` / `QUOTATION_VALIDITY_MONTHS`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuotationDefaults {
    pub tax_percentage: Decimal,
    pub validity_months: u32,
}

impl Default for QuotationDefaults {
    fn default() -> Self {
        Self {
            tax_percentage: DEFAULT_TAX_PERCENTAGE,
            validity_months: DEFAULT_VALIDITY_MONTHS,
        }
    }
}

impl QuotationDefaults {
    /// Validity date for a quotation created at `now`.
    pub fn valid_date_from(&self, now: Timestamp) -> Result<Timestamp, CoreError> {
        now.checked_add_months(Months::new(self.validity_months))
            .ok_or_else(|| CoreError::Internal("quotation validity date out of range".to_string()))
    }
}

/// Tax must be a percentage between 0 and 100 inclusive.
pub fn validate_tax_percentage(value: Decimal) -> Result<(), CoreError> {
    if value < Decimal::ZERO || value > Decimal::ONE_HUNDRED {
        return Err(CoreError::Validation(format!(
            "tax_percentage must be between 0 and 100 (got {value})"
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Line items
// ---------------------------------------------------------------------------

/// One BOQ job with its aggregated material cost, as read from storage.
#[derive(Debug, Clone)]
pub struct LineInput {
    pub boq_job_id: DbId,
    pub job_id: DbId,
    pub job_name: String,
    pub unit: String,
    pub quantity: Decimal,
    pub labor_cost: Decimal,
    pub selling_price: Option<Decimal>,
    /// Sum of estimated prices of the job's material price logs. `None` when
    /// no log matched.
    pub total_material_cost: Option<Decimal>,
}

/// A priced quotation line.
#[derive(Debug, Clone, Serialize)]
pub struct QuotationLine {
    pub boq_job_id: DbId,
    pub job_id: DbId,
    pub job_name: String,
    pub unit: String,
    pub quantity: Decimal,
    pub labor_cost: Decimal,
    pub total_material_cost: Decimal,
    pub labor_total: Decimal,
    pub material_total: Decimal,
    pub line_total: Decimal,
    pub selling_price: Option<Decimal>,
    pub selling_total: Option<Decimal>,
}

impl QuotationLine {
    /// Amount this line contributes to the selling side of the document.
    /// Lines without a selling price are offered at cost.
    pub fn offered_total(&self) -> Decimal {
        self.selling_total.unwrap_or(self.line_total)
    }
}

/// Price a single BOQ job.
///
/// `line_total = labor_cost * quantity + total_material_cost * quantity`,
/// falling back to the labor part alone when no material was logged.
pub fn compute_line(input: &LineInput) -> QuotationLine {
    let labor_total = round_money(input.labor_cost * input.quantity);
    let (total_material_cost, material_total) = match input.total_material_cost {
        Some(cost) => (cost, round_money(cost * input.quantity)),
        None => (Decimal::ZERO, Decimal::ZERO),
    };
    let selling_total = input
        .selling_price
        .map(|price| round_money(price * input.quantity));

    QuotationLine {
        boq_job_id: input.boq_job_id,
        job_id: input.job_id,
        job_name: input.job_name.clone(),
        unit: input.unit.clone(),
        quantity: input.quantity,
        labor_cost: input.labor_cost,
        total_material_cost,
        labor_total,
        material_total,
        line_total: labor_total + material_total,
        selling_price: input.selling_price,
        selling_total,
    }
}

// ---------------------------------------------------------------------------
// Document totals
// ---------------------------------------------------------------------------

/// Totals over all lines plus general costs. Tax is not included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QuotationTotals {
    pub job_cost_total: Decimal,
    pub job_selling_total: Decimal,
    pub general_cost_total: Decimal,
    /// Selling-side general cost: the BOQ's `selling_general_cost` when set,
    /// otherwise the sum of estimated general costs.
    pub selling_general_cost: Decimal,
    pub cost_total: Decimal,
    pub selling_total: Decimal,
}

/// Sum lines and general costs. General costs are a flat addend and are
/// never distributed over lines.
pub fn compute_totals(
    lines: &[QuotationLine],
    general_costs: &[Decimal],
    selling_general_cost: Option<Decimal>,
) -> QuotationTotals {
    let job_cost_total: Decimal = lines.iter().map(|l| l.line_total).sum();
    let job_selling_total: Decimal = lines.iter().map(QuotationLine::offered_total).sum();
    let general_cost_total: Decimal = general_costs.iter().copied().sum();
    let selling_general_cost = selling_general_cost.unwrap_or(general_cost_total);

    QuotationTotals {
        job_cost_total,
        job_selling_total,
        general_cost_total,
        selling_general_cost,
        cost_total: job_cost_total + general_cost_total,
        selling_total: job_selling_total + selling_general_cost,
    }
}

/// Whole-document amount with tax, computed at approval and export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DocumentAmount {
    pub subtotal: Decimal,
    pub tax_percentage: Decimal,
    pub tax_amount: Decimal,
    pub final_amount: Decimal,
}

pub fn apply_tax(subtotal: Decimal, tax_percentage: Decimal) -> DocumentAmount {
    let subtotal = round_money(subtotal);
    let tax_amount = percentage_of(subtotal, tax_percentage);
    DocumentAmount {
        subtotal,
        tax_percentage,
        tax_amount,
        final_amount: subtotal + tax_amount,
    }
}
