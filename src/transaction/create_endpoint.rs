//! Defines the endpoint for recording a new transaction.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
// axum_extra's Form parses an empty description as the default instead of
// rejecting the request.
use axum_extra::extract::Form;
use axum_htmx::HxRedirect;
use serde::Deserialize;
use time::Date;

use crate::{
    app_state::LedgerState,
    endpoints,
    ledger::{CategoryId, Ledger, NewTransaction, iso_date, record_transaction},
};

/// The form data for recording a transaction.
#[derive(Debug, Deserialize)]
pub struct TransactionForm {
    /// The size of the expense in dollars.
    pub amount: f64,
    /// The date when the transaction ocurred.
    #[serde(with = "iso_date")]
    pub date: Date,
    /// Text detailing the transaction.
    #[serde(default)]
    pub description: String,
    pub category_id: CategoryId,
}

/// A route handler for recording a transaction, redirects to the transactions
/// view on success.
pub async fn create_transaction_endpoint(
    State(state): State<LedgerState>,
    Form(form): Form<TransactionForm>,
) -> Response {
    let mut ledger = match state.lock() {
        Ok(ledger) => ledger,
        Err(error) => return error.into_alert_response(),
    };
    let Ledger { document, store } = &mut *ledger;

    let new_transaction = NewTransaction {
        amount: form.amount,
        description: form.description,
        date: form.date,
        category_id: form.category_id,
    };

    if let Err(error) = record_transaction(document, store, new_transaction) {
        if error.is_rejection() {
            tracing::debug!("transaction rejected: {error}");
        } else {
            tracing::error!("could not record transaction: {error}");
        }

        return error.into_alert_response();
    }

    (
        HxRedirect(endpoints::TRANSACTIONS_VIEW.to_owned()),
        StatusCode::SEE_OTHER,
    )
        .into_response()
}
