//! Application router configuration.

use axum::{
    Router, middleware,
    response::Redirect,
    routing::{get, post, put},
};
use tower_http::services::ServeDir;

use crate::{
    AppState,
    auth::basic_auth_guard,
    budget::{
        create_category_endpoint, get_budget_page, preview_remaining_endpoint,
        save_budget_endpoint, update_allocation_endpoint,
    },
    dashboard::get_dashboard_page,
    document_endpoint::get_document,
    endpoints,
    error_page::get_404_not_found,
    logging::logging_middleware,
    simulation::get_simulation_page,
    transaction::{create_transaction_endpoint, get_transactions_page},
};

/// Return a router with all the app's routes.
///
/// Every route except static files requires basic auth.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(endpoints::ROOT, get(get_index_page))
        .route(endpoints::DASHBOARD_VIEW, get(get_dashboard_page))
        .route(endpoints::BUDGET_VIEW, get(get_budget_page))
        .route(endpoints::TRANSACTIONS_VIEW, get(get_transactions_page))
        .route(endpoints::SIMULATION_VIEW, get(get_simulation_page))
        .route(endpoints::POST_BUDGET, post(save_budget_endpoint))
        .route(
            endpoints::POST_BUDGET_REMAINING,
            post(preview_remaining_endpoint),
        )
        .route(endpoints::POST_CATEGORY, post(create_category_endpoint))
        .route(
            endpoints::PUT_CATEGORY_ALLOCATION,
            put(update_allocation_endpoint),
        )
        .route(endpoints::POST_TRANSACTION, post(create_transaction_endpoint))
        .route(endpoints::DOCUMENT_API, get(get_document))
        .nest_service(endpoints::STATIC, ServeDir::new("static/"))
        .fallback(get_404_not_found)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            basic_auth_guard,
        ))
        .layer(middleware::from_fn(logging_middleware))
        .with_state(state)
}

/// The root path '/' redirects to the dashboard page.
async fn get_index_page() -> Redirect {
    Redirect::to(endpoints::DASHBOARD_VIEW)
}
