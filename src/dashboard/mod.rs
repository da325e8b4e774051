//! Dashboard module
//!
//! Provides an overview page with the household's income, spending and the
//! progress of each budget category.

mod cards;
mod handlers;

pub use handlers::get_dashboard_page;
