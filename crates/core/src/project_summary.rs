//! Estimated-versus-actual cost summary for a project.
//!
//! The summary refuses to produce partial totals: if any material price log
//! of the BOQ lacks an actual price, it fails with
//! [`CoreError::MissingPriceInformation`].

use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::CoreError;
use crate::money::round_money;
use crate::quotation::QuotationLine;
use crate::types::DbId;

/// Actual material prices recorded for one BOQ job.
#[derive(Debug, Clone)]
pub struct JobActuals {
    pub job_id: DbId,
    pub job_name: String,
    /// Sum of `actual_price` over the job's price logs that have one.
    pub actual_material_cost: Decimal,
    /// Number of the job's price logs without an actual price.
    pub missing_prices: i64,
}

/// Estimated and actual amount of one general-cost type.
#[derive(Debug, Clone, Copy)]
pub struct GeneralCostAmounts {
    pub estimated: Decimal,
    pub actual: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CostBreakdown {
    pub labor: Decimal,
    pub material: Decimal,
    pub general: Decimal,
    pub total: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProjectSummary {
    pub estimated: CostBreakdown,
    pub actual: CostBreakdown,
    pub revenue: Decimal,
    pub estimated_margin: Decimal,
    pub actual_margin: Decimal,
}

/// Build the summary. Labor has no separate actual figure, so the estimated
/// labor total is carried to the actual side.
pub fn summarize(
    lines: &[QuotationLine],
    actuals: &[JobActuals],
    general_costs: &[GeneralCostAmounts],
    revenue: Decimal,
) -> Result<ProjectSummary, CoreError> {
    let incomplete: Vec<&str> = actuals
        .iter()
        .filter(|a| a.missing_prices > 0)
        .map(|a| a.job_name.as_str())
        .collect();
    if !incomplete.is_empty() {
        return Err(CoreError::MissingPriceInformation(format!(
            "missing price information for jobs: {}",
            incomplete.join(", ")
        )));
    }

    let labor: Decimal = lines.iter().map(|l| l.labor_total).sum();
    let estimated_material: Decimal = lines.iter().map(|l| l.material_total).sum();
    let actual_material: Decimal = lines
        .iter()
        .map(|line| {
            actuals
                .iter()
                .find(|a| a.job_id == line.job_id)
                .map(|a| round_money(a.actual_material_cost * line.quantity))
                .unwrap_or(Decimal::ZERO)
        })
        .sum();
    let estimated_general: Decimal = general_costs.iter().map(|g| g.estimated).sum();
    let actual_general: Decimal = general_costs.iter().map(|g| g.actual).sum();

    let estimated = CostBreakdown {
        labor,
        material: estimated_material,
        general: estimated_general,
        total: labor + estimated_material + estimated_general,
    };
    let actual = CostBreakdown {
        labor,
        material: actual_material,
        general: actual_general,
        total: labor + actual_material + actual_general,
    };

    Ok(ProjectSummary {
        estimated,
        actual,
        revenue,
        estimated_margin: revenue - estimated.total,
        actual_margin: revenue - actual.total,
    })
}
