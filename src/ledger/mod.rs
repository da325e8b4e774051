//! The budget ledger: incomes, category allocations and the transactions that
//! spend them.

mod document;
mod domain;
mod operations;
mod projection;
mod summary;

pub use document::{Document, SAVINGS_CATEGORY_NAME, SpentMismatch};
pub use domain::{
    Category, CategoryId, CategoryName, Income, IncomeId, IncomeSource, NewTransaction,
    Transaction, TransactionId, iso_date,
};
pub use operations::{
    add_category, append_income, load_or_initialize, persist, record_income, record_transaction,
    replace_incomes, save_budget, set_category_allocation,
};
pub use projection::{
    DEFAULT_PROJECTION_YEARS, SavingsProjection, default_current_savings,
    default_monthly_savings, project_savings,
};
pub use summary::{
    BudgetAllocationView, CategoryProgress, DashboardSummary, current_balance, remaining,
    total_allocated, total_income, total_income_from, total_spent,
};

use crate::{Error, store::DocumentStore};

/// A document together with the store it is saved to.
pub struct Ledger {
    /// The in-memory copy that every operation mutates.
    pub document: Document,
    /// Where the document is saved after each change.
    pub store: Box<dyn DocumentStore + Send>,
}

impl Ledger {
    /// Load the document from `store`, seeding it if the store is empty.
    pub fn open(store: impl DocumentStore + Send + 'static) -> Result<Self, Error> {
        let document = load_or_initialize(&store)?;

        Ok(Self {
            document,
            store: Box::new(store),
        })
    }
}

impl std::fmt::Debug for Ledger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ledger")
            .field("document", &self.document)
            .finish_non_exhaustive()
    }
}
