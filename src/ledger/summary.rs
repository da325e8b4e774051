//! Figures derived from a ledger document.
//!
//! Nothing here mutates or saves the document.

use crate::ledger::{Category, Document, IncomeSource};

/// The sum of all recorded incomes.
pub fn total_income(document: &Document) -> f64 {
    document.incomes.iter().map(|income| income.amount).sum()
}

/// The sum of the incomes from `source`, or `None` if there are none.
pub fn total_income_from(document: &Document, source: IncomeSource) -> Option<f64> {
    document
        .incomes
        .iter()
        .filter(|income| income.source == source)
        .map(|income| income.amount)
        .reduce(|total, amount| total + amount)
}

/// The sum of all category allocations.
pub fn total_allocated(document: &Document) -> f64 {
    document
        .categories
        .iter()
        .map(|category| category.allocated)
        .sum()
}

/// The sum of all category spending.
pub fn total_spent(document: &Document) -> f64 {
    document.categories.iter().map(|category| category.spent).sum()
}

/// How much income has not been allocated to a category yet.
///
/// Takes totals rather than a document since the budget form works with
/// incomes that have not been saved.
pub fn remaining(total_income: f64, total_allocated: f64) -> f64 {
    total_income - total_allocated
}

/// Income minus everything spent so far.
pub fn current_balance(document: &Document) -> f64 {
    total_income(document) - total_spent(document)
}

/// The headline figures on the dashboard.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSummary {
    /// See [total_income].
    pub total_income: f64,
    /// See [total_spent].
    pub total_spent: f64,
    /// See [current_balance].
    pub current_balance: f64,
    /// One entry per category, in document order.
    pub categories: Vec<CategoryProgress>,
}

/// How far through its allocation a category is.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryProgress {
    /// The category being summarised.
    pub category: Category,
    /// See [Category::balance].
    pub balance: f64,
    /// See [Category::usage_percent].
    pub usage_percent: f64,
    /// See [Category::is_over_budget].
    pub is_over_budget: bool,
}

impl DashboardSummary {
    /// Summarise `document`.
    pub fn new(document: &Document) -> Self {
        let categories = document
            .categories
            .iter()
            .map(|category| CategoryProgress {
                category: category.clone(),
                balance: category.balance(),
                usage_percent: category.usage_percent(),
                is_over_budget: category.is_over_budget(),
            })
            .collect();

        Self {
            total_income: total_income(document),
            total_spent: total_spent(document),
            current_balance: current_balance(document),
            categories,
        }
    }
}

/// The figures shown while allocating the budget.
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetAllocationView {
    /// Income being divided up.
    pub total_income: f64,
    /// See [total_allocated].
    pub total_allocated: f64,
    /// See [remaining].
    pub remaining: f64,
}

impl BudgetAllocationView {
    /// Build the view from the stored incomes.
    pub fn new(document: &Document) -> Self {
        Self::with_income(document, total_income(document))
    }

    /// Build the view from an income total that may not have been saved yet.
    pub fn with_income(document: &Document, total_income: f64) -> Self {
        let total_allocated = total_allocated(document);

        Self {
            total_income,
            total_allocated,
            remaining: remaining(total_income, total_allocated),
        }
    }

    /// Whether more has been allocated than is coming in.
    pub fn is_over_allocated(&self) -> bool {
        self.remaining < 0.0
    }
}
