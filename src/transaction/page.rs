//! The transactions page: the add-transaction form and the history table.

use axum::{
    extract::State,
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use time::{Date, OffsetDateTime};

use crate::{
    Error,
    app_state::LedgerState,
    endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, FORM_CONTAINER_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE,
        PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE, base,
        dollar_input_styles, format_currency, link, page_header,
    },
    ledger::{Category, Document, Transaction},
    navigation::NavBar,
};

const UNKNOWN_CATEGORY: &str = "Unknown category";
const NO_DESCRIPTION: &str = "No description";

/// Renders the page for recording and listing transactions.
pub async fn get_transactions_page(State(state): State<LedgerState>) -> Result<Response, Error> {
    let today = OffsetDateTime::now_local()
        .unwrap_or_else(|_| OffsetDateTime::now_utc())
        .date();
    let ledger = state.lock()?;

    Ok(transactions_view(&ledger.document, today).into_response())
}

fn transactions_view(document: &Document, today: Date) -> Markup {
    let nav_bar = NavBar::new(endpoints::TRANSACTIONS_VIEW).into_html();

    let content = html! {
        (nav_bar)

        div class=(PAGE_CONTAINER_STYLE)
        {
            (page_header("Transactions", "Record what the household spends."))

            div class=(FORM_CONTAINER_STYLE)
            {
                @if document.categories.is_empty() {
                    p
                    {
                        "Transactions are recorded against a category. "
                        (link(endpoints::BUDGET_VIEW, "Add a category"))
                        " first."
                    }
                } @else {
                    (transaction_form_view(&document.categories, today))
                }
            }

            section class="w-full max-w-4xl mt-8"
            {
                h2 class="text-xl font-semibold mb-4" { "History" }

                @if document.transactions.is_empty() {
                    p { "No transactions have been recorded yet." }
                } @else {
                    (history_table_view(document))
                }
            }
        }
    };

    base("Transactions", &[dollar_input_styles()], &content)
}

fn transaction_form_view(categories: &[Category], today: Date) -> Markup {
    html! {
        form
            hx-post=(endpoints::POST_TRANSACTION)
            hx-target-error="#alert-container"
            class="w-full space-y-4 md:space-y-6"
        {
            h2 class="text-xl font-bold" { "New Transaction" }

            div
            {
                label for="amount" class=(FORM_LABEL_STYLE) { "Amount" }

                div class="input-wrapper w-full"
                {
                    input
                        name="amount"
                        id="amount"
                        type="number"
                        step="0.01"
                        min="0.01"
                        placeholder="0.00"
                        required
                        autofocus
                        class=(FORM_TEXT_INPUT_STYLE);
                }
            }

            div
            {
                label for="date" class=(FORM_LABEL_STYLE) { "Date" }

                input
                    name="date"
                    id="date"
                    type="date"
                    required
                    value=(today)
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div
            {
                label for="description" class=(FORM_LABEL_STYLE) { "Description" }

                input
                    name="description"
                    id="description"
                    type="text"
                    placeholder="Description"
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div
            {
                label for="category_id" class=(FORM_LABEL_STYLE) { "Category" }

                select name="category_id" id="category_id" required class=(FORM_TEXT_INPUT_STYLE)
                {
                    option value="" { "Select a category" }

                    @for category in categories {
                        option value=(category.id) { (category.name.as_ref()) }
                    }
                }
            }

            button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Record Transaction" }
        }
    }
}

/// Transactions ordered newest first, later entries first within a day.
fn newest_first(transactions: &[Transaction]) -> Vec<&Transaction> {
    let mut sorted: Vec<_> = transactions.iter().rev().collect();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));
    sorted
}

fn history_table_view(document: &Document) -> Markup {
    html! {
        table id="transaction-history" class="w-full text-sm text-left rtl:text-right text-gray-500 dark:text-gray-400"
        {
            thead class=(TABLE_HEADER_STYLE)
            {
                tr
                {
                    th scope="col" class=(TABLE_CELL_STYLE) { "Date" }
                    th scope="col" class=(TABLE_CELL_STYLE) { "Description" }
                    th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                    th scope="col" class="px-6 py-4 text-right" { "Amount" }
                }
            }

            tbody
            {
                @for transaction in newest_first(&document.transactions) {
                    tr class=(TABLE_ROW_STYLE) data-transaction-id=(transaction.id)
                    {
                        td class=(TABLE_CELL_STYLE) { (transaction.date) }
                        td class=(TABLE_CELL_STYLE)
                        {
                            @if transaction.description.trim().is_empty() {
                                span class="italic" { (NO_DESCRIPTION) }
                            } @else {
                                (transaction.description)
                            }
                        }
                        td class=(TABLE_CELL_STYLE)
                        {
                            @match document.category(&transaction.category_id) {
                                Some(category) => { (category.name.as_ref()) }
                                None => { span class="italic" { (UNKNOWN_CATEGORY) } }
                            }
                        }
                        td class="px-6 py-4 text-right" { (format_currency(transaction.amount)) }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::extract::State;
    use scraper::{Html, Selector};
    use time::macros::date;

    use crate::{
        endpoints,
        ledger::{Document, Transaction},
        test_utils::{
            assert_content_type, assert_form_input, assert_form_submit_button,
            assert_valid_html, ledger_state, must_get_form, parse_html_document,
        },
        transaction::{get_transactions_page, page::transactions_view},
    };

    fn transaction(id: &str, date: time::Date, description: &str, category_id: &str) -> Transaction {
        Transaction {
            id: id.to_owned(),
            description: description.to_owned(),
            amount: 10.0,
            date,
            category_id: category_id.to_owned(),
        }
    }

    fn column(html: &Html, index: usize) -> Vec<String> {
        let rows = Selector::parse("#transaction-history tbody tr").unwrap();
        let cells = Selector::parse("td").unwrap();

        html.select(&rows)
            .map(|row| {
                row.select(&cells)
                    .nth(index)
                    .unwrap()
                    .text()
                    .collect::<String>()
                    .trim()
                    .to_owned()
            })
            .collect()
    }

    #[tokio::test]
    async fn renders_form_with_category_options() {
        let state = ledger_state(Document::seed());

        let response = get_transactions_page(State(state)).await.unwrap();

        assert_content_type(&response, "text/html; charset=utf-8");
        let html = parse_html_document(response).await;
        assert_valid_html(&html);
        let form = must_get_form(&html, "hx-post", endpoints::POST_TRANSACTION);
        assert_form_input(&form, "amount", "number");
        assert_form_input(&form, "date", "date");
        assert_form_input(&form, "category_id", "select");
        assert_form_submit_button(&form, "Record Transaction");

        let options: Vec<_> = form
            .select(&Selector::parse("option").unwrap())
            .filter_map(|option| option.value().attr("value"))
            .collect();
        assert_eq!(options, vec!["", "1", "2", "3", "4", "5"]);
    }

    #[test]
    fn history_is_newest_first_with_fallbacks() {
        let mut document = Document::seed();
        document.transactions = vec![
            transaction("a", date!(2025-01-05), "Groceries", "1"),
            transaction("b", date!(2025-02-01), "", "deleted"),
            transaction("c", date!(2025-01-05), "Movie", "4"),
        ];

        let html = Html::parse_document(
            &transactions_view(&document, date!(2025-02-02)).into_string(),
        );

        assert_valid_html(&html);
        assert_eq!(column(&html, 0), vec!["2025-02-01", "2025-01-05", "2025-01-05"]);
        assert_eq!(column(&html, 1), vec!["No description", "Movie", "Groceries"]);
        assert_eq!(
            column(&html, 2),
            vec!["Unknown category", "Entertainment", "Food"]
        );
    }

    #[test]
    fn date_defaults_to_today() {
        let html = Html::parse_document(
            &transactions_view(&Document::seed(), date!(2025-02-02)).into_string(),
        );
        let date_input = html
            .select(&Selector::parse("input[name=date]").unwrap())
            .next()
            .unwrap();

        assert_eq!(date_input.value().attr("value"), Some("2025-02-02"));
    }

    #[test]
    fn no_categories_hides_form() {
        let mut document = Document::seed();
        document.categories.clear();

        let html =
            Html::parse_document(&transactions_view(&document, date!(2025-02-02)).into_string());

        assert!(html.select(&Selector::parse("form").unwrap()).next().is_none());
    }
}
