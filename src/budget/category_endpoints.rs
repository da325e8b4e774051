//! Endpoints for creating categories and changing a single allocation.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::Form;
use axum_htmx::HxRedirect;
use serde::Deserialize;

use crate::{
    ErrorKind,
    alert::Alert,
    app_state::LedgerState,
    budget::page::new_category_form_view,
    endpoints,
    html::format_currency,
    ledger::{CategoryId, Ledger, add_category, set_category_allocation},
};

#[derive(Debug, Deserialize)]
pub struct CategoryForm {
    pub name: String,
}

/// Handle the add-category form.
///
/// An invalid name re-renders the form with the error message, otherwise the
/// client is sent back to the budget page.
pub async fn create_category_endpoint(
    State(state): State<LedgerState>,
    Form(form): Form<CategoryForm>,
) -> Response {
    let mut ledger = match state.lock() {
        Ok(ledger) => ledger,
        Err(error) => return error.into_alert_response(),
    };
    let Ledger { document, store } = &mut *ledger;

    match add_category(document, store, &form.name) {
        Ok(category) => {
            tracing::info!("created category {} ({})", category.name, category.id);
            (
                HxRedirect(endpoints::BUDGET_VIEW.to_owned()),
                StatusCode::SEE_OTHER,
            )
                .into_response()
        }
        Err(error) if error.kind() == ErrorKind::Validation => {
            new_category_form_view(&format!("Error: {error}")).into_response()
        }
        Err(error) => error.into_alert_response(),
    }
}

#[derive(Debug, Deserialize)]
pub struct AllocationForm {
    pub allocated: f64,
}

/// Set the allocation of the category in the path.
pub async fn update_allocation_endpoint(
    State(state): State<LedgerState>,
    Path(category_id): Path<CategoryId>,
    Form(form): Form<AllocationForm>,
) -> Response {
    let mut ledger = match state.lock() {
        Ok(ledger) => ledger,
        Err(error) => return error.into_alert_response(),
    };
    let Ledger { document, store } = &mut *ledger;

    match set_category_allocation(document, store, &category_id, form.allocated) {
        Ok(category) => Alert::Success {
            message: "Allocation saved".to_owned(),
            details: format!(
                "{} now has {} allocated.",
                category.name,
                format_currency(category.allocated)
            ),
        }
        .into_html()
        .into_response(),
        Err(error) => error.into_alert_response(),
    }
}

#[cfg(test)]
mod create_category_endpoint_tests {
    use axum::{extract::State, http::StatusCode, response::IntoResponse};
    use axum_extra::extract::Form;
    use scraper::Selector;

    use crate::{
        budget::{category_endpoints::CategoryForm, create_category_endpoint},
        endpoints,
        ledger::Document,
        test_utils::{
            assert_hx_redirect, assert_valid_html, current_document, ledger_state,
            must_select_text, parse_html_fragment,
        },
    };

    #[tokio::test]
    async fn can_create_category() {
        let state = ledger_state(Document::seed());
        let form = CategoryForm {
            name: "  Gifts ".to_owned(),
        };

        let response = create_category_endpoint(State(state.clone()), Form(form))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_hx_redirect(&response, endpoints::BUDGET_VIEW);
        let document = current_document(&state);
        assert_eq!(document.categories.len(), 6);
        let gifts = document.category_by_name("Gifts").unwrap();
        assert_eq!(gifts.allocated, 0.0);
        assert_eq!(gifts.spent, 0.0);
    }

    #[tokio::test]
    async fn blank_name_renders_error() {
        let state = ledger_state(Document::seed());
        let form = CategoryForm {
            name: "   ".to_owned(),
        };

        let response = create_category_endpoint(State(state.clone()), Form(form))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::OK);
        let html = parse_html_fragment(response).await;
        assert_valid_html(&html);
        assert!(
            html.select(&Selector::parse("form").unwrap())
                .next()
                .is_some()
        );
        assert_eq!(
            must_select_text(&html, "form p"),
            "Error: Category name cannot be empty"
        );
        assert_eq!(current_document(&state), Document::seed());
    }
}
