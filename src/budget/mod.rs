//! Income entry, category allocation and category creation.

mod category_endpoints;
mod page;
mod remaining_endpoint;
mod save_endpoint;

pub use category_endpoints::{create_category_endpoint, update_allocation_endpoint};
pub use page::get_budget_page;
pub use remaining_endpoint::preview_remaining_endpoint;
pub use save_endpoint::save_budget_endpoint;
