//! The root aggregate that holds every income, category and transaction.

use serde::{Deserialize, Serialize};

use crate::ledger::{Category, CategoryId, CategoryName, Income, Transaction};

/// The name of the category whose balance counts as current savings.
pub const SAVINGS_CATEGORY_NAME: &str = "Savings";

const DEFAULT_CATEGORY_NAMES: [&str; 5] = [
    "Food",
    "Rent",
    "Utilities",
    "Entertainment",
    SAVINGS_CATEGORY_NAME,
];

/// The entire persisted state of the ledger.
///
/// Lookups are linear scans over the sequences, there are no secondary indexes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Income entries in the order they were recorded.
    pub incomes: Vec<Income>,
    /// Budget categories in display order.
    pub categories: Vec<Category>,
    /// Expenses in the order they were recorded.
    pub transactions: Vec<Transaction>,
}

/// A category whose stored `spent` differs from the sum of its transactions.
#[derive(Debug, Clone, PartialEq)]
pub struct SpentMismatch {
    /// The category whose totals disagree.
    pub category_id: CategoryId,
    /// The `spent` value saved in the document.
    pub stored: f64,
    /// The sum of the category's transactions.
    pub replayed: f64,
}

impl Document {
    /// The document used when nothing has been stored yet: no incomes, no
    /// transactions and the default categories with nothing allocated.
    pub fn seed() -> Self {
        let categories = DEFAULT_CATEGORY_NAMES
            .iter()
            .enumerate()
            .map(|(index, name)| Category {
                id: (index + 1).to_string(),
                name: CategoryName::new_unchecked(name),
                allocated: 0.0,
                spent: 0.0,
            })
            .collect();

        Self {
            incomes: Vec::new(),
            categories,
            transactions: Vec::new(),
        }
    }

    /// Find a category by its ID.
    pub fn category(&self, category_id: &str) -> Option<&Category> {
        self.categories
            .iter()
            .find(|category| category.id == category_id)
    }

    pub(crate) fn category_mut(&mut self, category_id: &str) -> Option<&mut Category> {
        self.categories
            .iter_mut()
            .find(|category| category.id == category_id)
    }

    /// Find the first category with exactly the name `name`.
    pub fn category_by_name(&self, name: &str) -> Option<&Category> {
        self.categories
            .iter()
            .find(|category| category.name.as_ref() == name)
    }

    /// All transactions recorded against `category_id`, in insertion order.
    pub fn transactions_for<'a>(
        &'a self,
        category_id: &'a str,
    ) -> impl Iterator<Item = &'a Transaction> + 'a {
        self.transactions
            .iter()
            .filter(move |transaction| transaction.category_id == category_id)
    }

    /// Whether any entity in the document already uses `id`.
    pub(crate) fn contains_id(&self, id: &str) -> bool {
        self.incomes.iter().any(|income| income.id == id)
            || self.categories.iter().any(|category| category.id == id)
            || self
                .transactions
                .iter()
                .any(|transaction| transaction.id == id)
    }

    /// Compare each category's `spent` against the sum of its transactions.
    ///
    /// An empty result means the spent invariant holds.
    pub fn spent_mismatches(&self) -> Vec<SpentMismatch> {
        self.categories
            .iter()
            .filter_map(|category| {
                let replayed: f64 = self
                    .transactions_for(&category.id)
                    .map(|transaction| transaction.amount)
                    .sum();

                if (replayed - category.spent).abs() > f64::EPSILON * replayed.abs().max(1.0) {
                    Some(SpentMismatch {
                        category_id: category.id.clone(),
                        stored: category.spent,
                        replayed,
                    })
                } else {
                    None
                }
            })
            .collect()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::seed()
    }
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use crate::ledger::{Document, SAVINGS_CATEGORY_NAME, SpentMismatch, Transaction};

    #[test]
    fn seed_has_five_empty_categories() {
        let document = Document::seed();

        assert!(document.incomes.is_empty());
        assert!(document.transactions.is_empty());
        assert_eq!(document.categories.len(), 5);
        for category in &document.categories {
            assert_eq!(category.allocated, 0.0);
            assert_eq!(category.spent, 0.0);
        }
        assert_eq!(
            document.category_by_name(SAVINGS_CATEGORY_NAME).unwrap().id,
            "5"
        );
    }

    #[test]
    fn seed_ids_are_unique() {
        let document = Document::seed();
        let mut ids: Vec<_> = document.categories.iter().map(|c| c.id.as_str()).collect();
        ids.sort();
        ids.dedup();

        assert_eq!(ids.len(), document.categories.len());
    }

    #[test]
    fn spent_mismatches_reports_edits_made_outside_record_transaction() {
        let mut document = Document::seed();
        document.transactions.push(Transaction {
            id: "t1".to_owned(),
            description: "Groceries".to_owned(),
            amount: 42.0,
            date: date!(2025 - 01 - 02),
            category_id: "1".to_owned(),
        });

        assert_eq!(
            document.spent_mismatches(),
            vec![SpentMismatch {
                category_id: "1".to_owned(),
                stored: 0.0,
                replayed: 42.0,
            }]
        );

        document.categories[0].spent = 42.0;
        assert!(document.spent_mismatches().is_empty());
    }
}
