//! The API endpoints URIs.
//!
//! For endpoints that take a parameter, e.g., '/api/categories/{category_id}/allocation', use [format_endpoint].

/// The root route which redirects to the dashboard.
pub const ROOT: &str = "/";
/// The landing page with the household totals.
pub const DASHBOARD_VIEW: &str = "/dashboard";
/// The page for entering incomes and allocating the budget.
pub const BUDGET_VIEW: &str = "/budget";
/// The page for recording and listing transactions.
pub const TRANSACTIONS_VIEW: &str = "/transactions";
/// The page for projecting future savings.
pub const SIMULATION_VIEW: &str = "/simulation";
/// The route for static files.
pub const STATIC: &str = "/static";
/// The browser's default icon request.
pub const FAVICON: &str = "/favicon.ico";

/// The route to save the budget form.
pub const POST_BUDGET: &str = "/api/budget";
/// The route that recomputes the budget form's remaining income while editing.
pub const POST_BUDGET_REMAINING: &str = "/api/budget/remaining";
/// The route to create a category.
pub const POST_CATEGORY: &str = "/api/categories";
/// The route to change a single category's allocation.
pub const PUT_CATEGORY_ALLOCATION: &str = "/api/categories/{category_id}/allocation";
/// The route to record a transaction.
pub const POST_TRANSACTION: &str = "/api/transactions";
/// The route to download the whole ledger document as JSON.
pub const DOCUMENT_API: &str = "/api/document";

/// Replace the parameter in `endpoint_path` with `id`.
///
/// Assumes `endpoint_path` has exactly one parameter in curly braces.
pub fn format_endpoint(endpoint_path: &str, id: &str) -> String {
    match (endpoint_path.find('{'), endpoint_path.find('}')) {
        (Some(start), Some(end)) if start < end => {
            format!("{}{}{}", &endpoint_path[..start], id, &endpoint_path[end + 1..])
        }
        _ => endpoint_path.to_owned(),
    }
}
