//! Linear savings projection.

use serde::Serialize;

use crate::ledger::{
    Document, SAVINGS_CATEGORY_NAME,
    summary::{total_allocated, total_income},
};

/// The horizons, in years, shown when the caller does not pick any.
pub const DEFAULT_PROJECTION_YEARS: [u32; 5] = [1, 3, 5, 10, 20];

/// Projected savings after a number of years.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingsProjection {
    /// Years from now.
    pub year: u32,
    /// Current savings plus the gain.
    pub future_value: f64,
    /// The total of the monthly contributions.
    pub gain: f64,
}

/// Project savings for each year in `years` by adding `monthly_savings` every
/// month, without interest.
pub fn project_savings(
    current_savings: f64,
    monthly_savings: f64,
    years: &[u32],
) -> Vec<SavingsProjection> {
    years
        .iter()
        .map(|&year| {
            let total_months = f64::from(year) * 12.0;
            let gain = monthly_savings * total_months;

            SavingsProjection {
                year,
                future_value: current_savings + gain,
                gain,
            }
        })
        .collect()
}

/// Unallocated income, or zero when the budget allocates more than the income.
pub fn default_monthly_savings(document: &Document) -> f64 {
    (total_income(document) - total_allocated(document)).max(0.0)
}

/// The balance of the first category named [SAVINGS_CATEGORY_NAME], or zero if
/// there is no such category.
pub fn default_current_savings(document: &Document) -> f64 {
    document
        .category_by_name(SAVINGS_CATEGORY_NAME)
        .map(|category| category.balance())
        .unwrap_or(0.0)
}
