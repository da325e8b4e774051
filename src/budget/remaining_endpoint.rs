//! Recomputes the budget page's remaining income from unsaved form values.

use axum::response::{IntoResponse, Response};
use axum_extra::extract::Form;

use crate::{
    Error,
    budget::{page::remaining_view, save_endpoint::BudgetForm},
    ledger::remaining,
};

/// Render the "Remaining" figure for the incomes and allocations currently on
/// the budget form. Nothing is saved.
pub async fn preview_remaining_endpoint(Form(form): Form<BudgetForm>) -> Response {
    let total_income: f64 = form.incomes().iter().map(|(_, amount)| amount).sum();
    let total_allocated: f64 = form.allocated.iter().sum();
    let remaining = remaining(total_income, total_allocated);

    if !remaining.is_finite() {
        tracing::debug!("cannot preview remaining income of {remaining}");
        return Error::NonFiniteAmount(remaining).into_alert_response();
    }

    remaining_view(remaining).into_response()
}
