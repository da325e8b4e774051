//! Dashboard HTTP handler and view rendering.

use axum::{
    extract::State,
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

use crate::{
    Error,
    app_state::LedgerState,
    dashboard::cards::{category_cards_view, summary_cards_view},
    endpoints,
    html::{LINK_STYLE, PAGE_CONTAINER_STYLE, base, page_header},
    ledger::DashboardSummary,
    navigation::NavBar,
};

/// Display the household totals and the progress of each category.
pub async fn get_dashboard_page(State(state): State<LedgerState>) -> Result<Response, Error> {
    let summary = {
        let ledger = state.lock()?;
        DashboardSummary::new(&ledger.document)
    };

    Ok(dashboard_view(&summary).into_response())
}

fn dashboard_view(summary: &DashboardSummary) -> Markup {
    let nav_bar = NavBar::new(endpoints::DASHBOARD_VIEW).into_html();

    let content = html! {
        (nav_bar)

        div class=(PAGE_CONTAINER_STYLE)
        {
            (page_header("Dashboard", "Where the household's money stands."))

            (summary_cards_view(summary))

            @if summary.categories.is_empty() {
                p
                {
                    "There are no categories yet. "
                    a href=(endpoints::BUDGET_VIEW) class=(LINK_STYLE) { "Add one on the budget page." }
                }
            } @else {
                (category_cards_view(&summary.categories))
            }

            nav class="w-full max-w-4xl flex flex-wrap gap-4 mt-8"
            {
                a href=(endpoints::BUDGET_VIEW) class=(LINK_STYLE) { "Set the budget" }
                a href=(endpoints::TRANSACTIONS_VIEW) class=(LINK_STYLE) { "Record a transaction" }
                a href=(endpoints::SIMULATION_VIEW) class=(LINK_STYLE) { "Project savings" }
            }
        }
    };

    base("Dashboard", &[], &content)
}

#[cfg(test)]
mod tests {
    use axum::extract::State;
    use scraper::Selector;
    use time::macros::datetime;

    use crate::{
        dashboard::get_dashboard_page,
        ledger::{Document, Income, IncomeSource},
        test_utils::{
            assert_content_type, assert_valid_html, ledger_state, must_select_text,
            parse_html_document,
        },
    };

    #[tokio::test]
    async fn seed_document_shows_zero_totals() {
        let state = ledger_state(Document::seed());

        let response = get_dashboard_page(State(state)).await.unwrap();

        assert_content_type(&response, "text/html; charset=utf-8");
        let html = parse_html_document(response).await;
        assert_valid_html(&html);
        assert_eq!(must_select_text(&html, "#total-income"), "$0.00");
        assert_eq!(must_select_text(&html, "#total-spent"), "$0.00");
        assert_eq!(must_select_text(&html, "#current-balance"), "$0.00");
        let cards = html
            .select(&Selector::parse("[data-category-id]").unwrap())
            .count();
        assert_eq!(cards, 5);
    }

    #[tokio::test]
    async fn overspent_category_is_marked() {
        let mut document = Document::seed();
        document.incomes.push(Income {
            id: "income".to_owned(),
            source: IncomeSource::Wife,
            amount: 1000.0,
            date: datetime!(2025-01-01 00:00 UTC),
        });
        document.categories[0].allocated = 100.0;
        document.categories[0].spent = 150.0;
        let state = ledger_state(document);

        let response = get_dashboard_page(State(state)).await.unwrap();

        let html = parse_html_document(response).await;
        let over_budget: Vec<_> = html
            .select(&Selector::parse("[data-over-budget=true]").unwrap())
            .filter_map(|card| card.value().attr("data-category-id"))
            .collect();
        assert_eq!(over_budget, vec!["1"]);
    }

    #[tokio::test]
    async fn no_categories_links_to_budget_page() {
        let mut document = Document::seed();
        document.categories.clear();
        let state = ledger_state(document);

        let response = get_dashboard_page(State(state)).await.unwrap();

        let html = parse_html_document(response).await;
        assert_valid_html(&html);
        assert!(
            html.select(&Selector::parse("[data-category-id]").unwrap())
                .next()
                .is_none()
        );
    }
}
