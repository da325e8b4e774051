#![allow(missing_docs)]

pub(crate) mod form;
pub(crate) mod html;
pub(crate) mod http;

use std::sync::{Arc, Mutex};

pub(crate) use form::{
    assert_form_input, assert_form_input_value, assert_form_submit_button, must_get_form,
};
pub(crate) use html::{
    assert_valid_html, must_select_text, parse_html_document, parse_html_fragment,
};
pub(crate) use http::{assert_content_type, assert_hx_redirect};

use crate::{
    app_state::LedgerState,
    ledger::{Document, Ledger},
    store::MemoryStore,
};

/// A ledger state holding `document`, backed by an in-memory store that
/// already contains it.
pub(crate) fn ledger_state(document: Document) -> LedgerState {
    let store = MemoryStore::with_document(&document).expect("Could not create memory store");

    LedgerState {
        ledger: Arc::new(Mutex::new(Ledger {
            document,
            store: Box::new(store),
        })),
    }
}

/// A copy of the document currently held by `state`.
pub(crate) fn current_document(state: &LedgerState) -> Document {
    state.ledger.lock().unwrap().document.clone()
}
