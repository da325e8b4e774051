//! Card components for the dashboard totals and per-category progress.

use maud::{Markup, html};

use crate::{
    html::{CARD_STYLE, format_currency, format_percent},
    ledger::{CategoryProgress, DashboardSummary},
};

/// Renders the three headline cards: income, spending and balance.
pub(super) fn summary_cards_view(summary: &DashboardSummary) -> Markup {
    let balance_accent = if summary.current_balance < 0.0 {
        "border-red-500"
    } else {
        "border-green-500"
    };

    html! {
        section class="w-full max-w-4xl grid grid-cols-1 md:grid-cols-3 gap-4 mb-8"
        {
            (summary_card("total-income", "Total Income", summary.total_income, "border-blue-500"))
            (summary_card("total-spent", "Total Spent", summary.total_spent, "border-orange-500"))
            (summary_card("current-balance", "Current Balance", summary.current_balance, balance_accent))
        }
    }
}

fn summary_card(id: &str, title: &str, amount: f64, accent: &str) -> Markup {
    html! {
        div class={ (CARD_STYLE) " " (accent) }
        {
            h2 class="text-sm font-medium text-gray-600 dark:text-gray-400" { (title) }
            p id=(id) class="text-2xl font-bold" { (format_currency(amount)) }
        }
    }
}

/// Renders one card per category showing how much of its allocation is used.
pub(super) fn category_cards_view(categories: &[CategoryProgress]) -> Markup {
    html! {
        section class="w-full max-w-4xl"
        {
            h3 class="text-xl font-semibold mb-4" { "Categories" }

            div class="grid grid-cols-1 sm:grid-cols-2 lg:grid-cols-3 gap-4"
            {
                @for progress in categories {
                    (category_card(progress))
                }
            }
        }
    }
}

fn category_card(progress: &CategoryProgress) -> Markup {
    let category = &progress.category;
    let (accent, balance_style) = if progress.is_over_budget {
        (
            "border-red-500",
            "text-right text-red-600 dark:text-red-400 font-semibold",
        )
    } else {
        ("border-blue-500", "text-right")
    };

    html! {
        div
            class={ (CARD_STYLE) " " (accent) }
            data-category-id=(category.id)
            data-over-budget=(if progress.is_over_budget { "true" } else { "false" })
        {
            h4 class="text-lg font-semibold mb-2 truncate" title=(category.name.as_ref()) { (category.name.as_ref()) }

            dl class="text-sm grid grid-cols-2 gap-1 mb-2"
            {
                dt { "Allocated" }
                dd class="text-right" { (format_currency(category.allocated)) }
                dt { "Spent" }
                dd class="text-right" { (format_currency(category.spent)) }
                dt { "Balance" }
                dd class=(balance_style)
                {
                    (format_currency(progress.balance))
                }
            }

            (progress_bar(progress.usage_percent, progress.is_over_budget))

            p class="text-xs text-gray-600 dark:text-gray-400"
            {
                (format_percent(progress.usage_percent)) " used"
                @if progress.is_over_budget { " (over budget)" }
            }
        }
    }
}

/// A horizontal bar filled to `percentage`, capped at 100%.
fn progress_bar(percentage: f64, is_over_budget: bool) -> Markup {
    let clamped = percentage.clamp(0.0, 100.0);
    let fill = if is_over_budget {
        "bg-red-600 dark:bg-red-500"
    } else {
        "bg-blue-600 dark:bg-blue-500"
    };

    html! {
        div
            class="w-full bg-gray-200 dark:bg-gray-700 rounded-full h-2.5 mb-2"
            role="progressbar"
            aria-valuenow=(format!("{clamped:.0}"))
            aria-valuemin="0"
            aria-valuemax="100"
        {
            @if clamped > 0.0 {
                div class={ (fill) " h-2.5 rounded-full" } style=(format!("width: {clamped:.1}%")) {}
            }
        }
    }
}
