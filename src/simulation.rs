//! The savings simulation page.
//!
//! Projects the household's savings forward assuming a fixed amount is saved
//! every month with no interest. Both inputs default to figures from the
//! ledger when they are not given in the query string.

use axum::{
    extract::State,
    response::{IntoResponse, Response},
};
use axum_extra::extract::Query;
use maud::{Markup, html};
use serde::Deserialize;

use crate::{
    Error,
    app_state::LedgerState,
    endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE,
        TABLE_ROW_STYLE, amount_input, base, dollar_input_styles, format_currency, page_header,
    },
    ledger::{
        DEFAULT_PROJECTION_YEARS, SavingsProjection, default_current_savings,
        default_monthly_savings, project_savings, remaining, total_allocated, total_income,
    },
    navigation::NavBar,
};

/// The simulation inputs. Empty or missing values fall back to the defaults.
#[derive(Debug, Default, Deserialize)]
pub struct SimulationQuery {
    pub current_savings: Option<f64>,
    pub monthly_savings: Option<f64>,
}

/// Render the projection table for the requested or default savings.
pub async fn get_simulation_page(
    State(state): State<LedgerState>,
    Query(query): Query<SimulationQuery>,
) -> Response {
    for value in [query.current_savings, query.monthly_savings].into_iter().flatten() {
        if !value.is_finite() {
            return Error::NonFiniteAmount(value).into_alert_response();
        }
    }

    let (current_savings, monthly_savings, unallocated) = {
        let ledger = match state.lock() {
            Ok(ledger) => ledger,
            Err(error) => return error.into_response(),
        };
        let document = &ledger.document;

        (
            query
                .current_savings
                .unwrap_or_else(|| default_current_savings(document)),
            query
                .monthly_savings
                .unwrap_or_else(|| default_monthly_savings(document)),
            remaining(total_income(document), total_allocated(document)),
        )
    };

    let projections = project_savings(current_savings, monthly_savings, &DEFAULT_PROJECTION_YEARS);

    simulation_view(current_savings, monthly_savings, unallocated, &projections).into_response()
}

fn simulation_view(
    current_savings: f64,
    monthly_savings: f64,
    unallocated: f64,
    projections: &[SavingsProjection],
) -> Markup {
    let nav_bar = NavBar::new(endpoints::SIMULATION_VIEW).into_html();

    let content = html! {
        (nav_bar)

        div class=(PAGE_CONTAINER_STYLE)
        {
            (page_header("Savings Simulation", "See how savings grow if you keep saving the same amount each month."))

            form
                method="get"
                action=(endpoints::SIMULATION_VIEW)
                class="w-full max-w-2xl grid grid-cols-1 md:grid-cols-2 gap-4 mb-4"
            {
                (amount_input("current_savings", "Current savings", Some(current_savings), true))
                (amount_input("monthly_savings", "Monthly savings", Some(monthly_savings), true))

                div class="md:col-span-2"
                {
                    button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Simulate" }
                }
            }

            p id="unallocated-hint" class="w-full max-w-2xl text-sm text-gray-600 dark:text-gray-400 mb-6"
            {
                "Income not yet allocated to a category: " (format_currency(unallocated))
            }

            (projection_table_view(projections))
        }
    };

    base("Savings Simulation", &[dollar_input_styles()], &content)
}

fn projection_table_view(projections: &[SavingsProjection]) -> Markup {
    html! {
        table id="projection-table" class="w-full max-w-2xl text-sm text-left rtl:text-right text-gray-500 dark:text-gray-400"
        {
            thead class=(TABLE_HEADER_STYLE)
            {
                tr
                {
                    th scope="col" class=(TABLE_CELL_STYLE) { "Years" }
                    th scope="col" class="px-6 py-4 text-right" { "Savings" }
                    th scope="col" class="px-6 py-4 text-right" { "Added" }
                }
            }

            tbody
            {
                @for projection in projections {
                    tr class=(TABLE_ROW_STYLE) data-year=(projection.year)
                    {
                        td class=(TABLE_CELL_STYLE)
                        {
                            (projection.year) @if projection.year == 1 { " year" } @else { " years" }
                        }
                        td class="px-6 py-4 text-right font-semibold" { (format_currency(projection.future_value)) }
                        td class="px-6 py-4 text-right" { "+" (format_currency(projection.gain)) }
                    }
                }
            }
        }
    }
}
