//! Serves the whole ledger document as JSON.

use axum::{Json, extract::State};

use crate::{Error, app_state::LedgerState, ledger::Document};

/// Return the in-memory ledger document in its stored JSON format.
pub async fn get_document(State(state): State<LedgerState>) -> Result<Json<Document>, Error> {
    let ledger = state.lock()?;

    Ok(Json(ledger.document.clone()))
}
