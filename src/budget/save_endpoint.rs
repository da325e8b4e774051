//! Saves the incomes and allocations submitted from the budget page.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::Form;
use axum_htmx::HxRedirect;
use serde::Deserialize;
use time::OffsetDateTime;

use crate::{
    Error,
    app_state::LedgerState,
    endpoints,
    ledger::{CategoryId, IncomeSource, Ledger, save_budget},
};

/// The budget form.
///
/// Income fields left empty are not saved. `category_id` and `allocated` are
/// parallel lists, one entry per row of the allocation table.
#[derive(Debug, Default, Deserialize)]
pub struct BudgetForm {
    pub husband_income: Option<f64>,
    pub wife_income: Option<f64>,
    pub other_income: Option<f64>,
    #[serde(default)]
    pub category_id: Vec<CategoryId>,
    #[serde(default)]
    pub allocated: Vec<f64>,
}

impl BudgetForm {
    pub(super) fn incomes(&self) -> Vec<(IncomeSource, f64)> {
        [
            (IncomeSource::Husband, self.husband_income),
            (IncomeSource::Wife, self.wife_income),
            (IncomeSource::Other, self.other_income),
        ]
        .into_iter()
        .filter_map(|(source, amount)| amount.map(|amount| (source, amount)))
        .collect()
    }

    fn allocations(&self) -> Result<Vec<(CategoryId, f64)>, Error> {
        if self.category_id.len() != self.allocated.len() {
            return Err(Error::MismatchedAllocations);
        }

        Ok(self
            .category_id
            .iter()
            .cloned()
            .zip(self.allocated.iter().copied())
            .collect())
    }
}

/// Replace the stored incomes with the form's and update every allocation.
///
/// Redirects back to the budget page on success. Nothing is changed if any
/// field is invalid.
pub async fn save_budget_endpoint(
    State(state): State<LedgerState>,
    Form(form): Form<BudgetForm>,
) -> Response {
    let allocations = match form.allocations() {
        Ok(allocations) => allocations,
        Err(error) => return error.into_alert_response(),
    };

    let mut ledger = match state.lock() {
        Ok(ledger) => ledger,
        Err(error) => return error.into_alert_response(),
    };
    let Ledger { document, store } = &mut *ledger;

    match save_budget(
        document,
        store,
        &form.incomes(),
        &allocations,
        OffsetDateTime::now_utc(),
    ) {
        Ok(()) => (
            HxRedirect(format!("{}?saved=true", endpoints::BUDGET_VIEW)),
            StatusCode::SEE_OTHER,
        )
            .into_response(),
        Err(error) => {
            tracing::debug!("budget form rejected: {error}");
            error.into_alert_response()
        }
    }
}
