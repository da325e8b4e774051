//! Recording expenses and listing the transaction history.

mod create_endpoint;
mod page;

pub use create_endpoint::create_transaction_endpoint;
pub use page::get_transactions_page;
