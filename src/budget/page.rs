//! The budget page: incomes, allocations and the add-category form.

use axum::{
    extract::State,
    response::{IntoResponse, Response},
};
use axum_extra::extract::Query;
use maud::{Markup, html};
use serde::Deserialize;

use crate::{
    Error,
    alert::Alert,
    app_state::LedgerState,
    endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, CARD_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE,
        PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE, amount_input,
        base, dollar_input_styles, format_currency, page_header,
    },
    ledger::{BudgetAllocationView, Category, Document, IncomeSource, total_income_from},
    navigation::NavBar,
};

/// Query parameters for the budget page.
#[derive(Debug, Default, Deserialize)]
pub struct BudgetPageQuery {
    /// Set after the budget form has been saved.
    #[serde(default)]
    pub saved: bool,
}

/// Render the budget page with the stored incomes and allocations.
pub async fn get_budget_page(
    State(state): State<LedgerState>,
    Query(query): Query<BudgetPageQuery>,
) -> Result<Response, Error> {
    let ledger = state.lock()?;

    Ok(budget_view(&ledger.document, query.saved).into_response())
}

fn budget_view(document: &Document, saved: bool) -> Markup {
    let nav_bar = NavBar::new(endpoints::BUDGET_VIEW).into_html();
    let totals = BudgetAllocationView::new(document);

    let content = html! {
        (nav_bar)

        div class=(PAGE_CONTAINER_STYLE)
        {
            (page_header("Budget", "Enter this month's income and divide it between the categories."))

            @if saved {
                div class="w-full max-w-2xl"
                {
                    (Alert::Success {
                        message: "Budget saved".to_owned(),
                        details: String::new(),
                    }.into_markup())
                }
            }

            (budget_form_view(document, &totals))

            section class={ (CARD_STYLE) " border-blue-500 max-w-2xl mt-8" }
            {
                h2 class="text-xl font-semibold mb-4" { "Add a Category" }
                (new_category_form_view(""))
            }
        }
    };

    base("Budget", &[dollar_input_styles()], &content)
}

fn budget_form_view(document: &Document, totals: &BudgetAllocationView) -> Markup {
    html! {
        form
            hx-post=(endpoints::POST_BUDGET)
            hx-target-error="#alert-container"
            class="w-full max-w-2xl space-y-8"
        {
            section class="space-y-4"
            {
                h2 class="text-xl font-semibold" { "Income" }

                div class="grid grid-cols-1 md:grid-cols-3 gap-4"
                {
                    @for source in IncomeSource::ALL {
                        (amount_input(
                            &income_field_name(source),
                            source.display_name(),
                            total_income_from(document, source),
                            false,
                        ))
                    }
                }
            }

            section class="space-y-4"
            {
                div class="flex justify-between items-baseline"
                {
                    h2 class="text-xl font-semibold" { "Allocations" }
                    (remaining_view(totals.remaining))
                }

                @if document.categories.is_empty() {
                    p { "There are no categories to allocate to." }
                } @else {
                    (allocation_table_view(&document.categories))
                }

                dl class="grid grid-cols-2 gap-1 text-sm"
                {
                    dt { "Total income" }
                    dd id="budget-total-income" class="text-right" { (format_currency(totals.total_income)) }
                    dt { "Total allocated" }
                    dd id="budget-total-allocated" class="text-right" { (format_currency(totals.total_allocated)) }
                }
            }

            button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Save Budget" }
        }
    }
}

/// The unallocated income, recomputed from the form as it is edited.
pub(super) fn remaining_view(remaining: f64) -> Markup {
    let style = if remaining < 0.0 {
        "text-red-600 dark:text-red-400"
    } else {
        "text-green-600 dark:text-green-400"
    };

    html! {
        span
            id="budget-remaining"
            class=(style)
            hx-post=(endpoints::POST_BUDGET_REMAINING)
            hx-trigger="input from:closest form delay:300ms"
            hx-include="closest form"
            hx-swap="outerHTML"
        {
            "Remaining: " (format_currency(remaining))
        }
    }
}

/// The form field holding the income from `source`.
fn income_field_name(source: IncomeSource) -> String {
    format!("{}_income", source.as_str())
}

fn allocation_table_view(categories: &[Category]) -> Markup {
    html! {
        table class="w-full text-sm text-left rtl:text-right text-gray-500 dark:text-gray-400"
        {
            thead class=(TABLE_HEADER_STYLE)
            {
                tr
                {
                    th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                    th scope="col" class=(TABLE_CELL_STYLE) { "Allocated" }
                    th scope="col" class=(TABLE_CELL_STYLE) { "Spent" }
                }
            }

            tbody
            {
                @for category in categories {
                    tr class=(TABLE_ROW_STYLE) data-category-id=(category.id)
                    {
                        td class=(TABLE_CELL_STYLE)
                        {
                            (category.name.as_ref())
                            input type="hidden" name="category_id" value=(category.id);
                        }

                        td class=(TABLE_CELL_STYLE)
                        {
                            div class="input-wrapper w-full"
                            {
                                input
                                    id=(format!("allocated-{}", category.id))
                                    type="number"
                                    name="allocated"
                                    step="any"
                                    value=(category.allocated)
                                    aria-label=(format!("Allocation for {}", category.name))
                                    required
                                    class=(FORM_TEXT_INPUT_STYLE);
                            }
                        }

                        td class=(TABLE_CELL_STYLE) { (format_currency(category.spent)) }
                    }
                }
            }
        }
    }
}

/// The add-category form, with `error_message` shown under the input.
pub(super) fn new_category_form_view(error_message: &str) -> Markup {
    html! {
        form
            hx-post=(endpoints::POST_CATEGORY)
            hx-swap="outerHTML"
            hx-target-error="#alert-container"
            class="w-full space-y-4"
        {
            div
            {
                label for="name" class=(FORM_LABEL_STYLE) { "Category Name" }

                input
                    id="name"
                    type="text"
                    name="name"
                    placeholder="Category Name"
                    required
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            @if !error_message.is_empty() {
                p class="text-red-600 dark:text-red-400" { (error_message) }
            }

            button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Add Category" }
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::extract::State;
    use axum_extra::extract::Query;
    use scraper::Selector;
    use time::macros::datetime;

    use crate::{
        budget::{get_budget_page, page::BudgetPageQuery},
        endpoints,
        ledger::{Document, Income, IncomeSource},
        test_utils::{
            assert_content_type, assert_form_input, assert_form_input_value,
            assert_form_submit_button, assert_valid_html, ledger_state, must_get_form,
            must_select_text, parse_html_document,
        },
    };

    fn document_with_income() -> Document {
        let mut document = Document::seed();
        document.incomes.push(Income {
            id: "h".to_owned(),
            source: IncomeSource::Husband,
            amount: 300000.0,
            date: datetime!(2025-02-01 00:00 UTC),
        });
        document.categories[1].allocated = 80000.0;
        document
    }

    #[tokio::test]
    async fn renders_budget_form() {
        let state = ledger_state(document_with_income());

        let response = get_budget_page(State(state), Query(BudgetPageQuery::default()))
            .await
            .unwrap();

        assert_content_type(&response, "text/html; charset=utf-8");
        let html = parse_html_document(response).await;
        assert_valid_html(&html);

        let form = must_get_form(&html, "hx-post", endpoints::POST_BUDGET);
        assert_form_input_value(&form, "husband_income", "300000");
        assert_form_input_value(&form, "wife_income", "");
        assert_form_input(&form, "allocated", "number");
        assert_form_submit_button(&form, "Save Budget");

        let category_ids: Vec<_> = form
            .select(&Selector::parse("input[name=category_id]").unwrap())
            .filter_map(|input| input.value().attr("value"))
            .collect();
        assert_eq!(category_ids, vec!["1", "2", "3", "4", "5"]);
        assert_eq!(
            form.select(&Selector::parse("input[name=allocated]").unwrap())
                .nth(1)
                .and_then(|input| input.value().attr("value")),
            Some("80000")
        );
    }

    #[tokio::test]
    async fn renders_add_category_form() {
        let state = ledger_state(Document::seed());

        let response = get_budget_page(State(state), Query(BudgetPageQuery::default()))
            .await
            .unwrap();

        let html = parse_html_document(response).await;
        let form = must_get_form(&html, "hx-post", endpoints::POST_CATEGORY);
        assert_form_input(&form, "name", "text");
        assert_form_submit_button(&form, "Add Category");
    }

    #[tokio::test]
    async fn shows_remaining_for_seed_document() {
        let state = ledger_state(Document::seed());

        let response = get_budget_page(State(state), Query(BudgetPageQuery::default()))
            .await
            .unwrap();

        let html = parse_html_document(response).await;
        assert_eq!(must_select_text(&html, "#budget-remaining"), "Remaining: $0.00");
        let remaining = html
            .select(&Selector::parse("#budget-remaining").unwrap())
            .next()
            .unwrap();
        assert_eq!(
            remaining.value().attr("hx-post"),
            Some(endpoints::POST_BUDGET_REMAINING)
        );
        assert_eq!(remaining.value().attr("hx-include"), Some("closest form"));
        assert!(
            html.select(&Selector::parse("[role=alert]").unwrap())
                .next()
                .is_none()
        );
    }

    #[tokio::test]
    async fn shows_saved_alert() {
        let state = ledger_state(Document::seed());

        let response = get_budget_page(State(state), Query(BudgetPageQuery { saved: true }))
            .await
            .unwrap();

        let html = parse_html_document(response).await;
        assert_eq!(must_select_text(&html, "[role=alert]"), "Budget saved");
    }
}
