//! Operations that change the ledger document.
//!
//! Every operation validates its input before touching the document, applies a
//! single mutation and then saves the whole document through the store. If the
//! save fails the mutation stays applied to the in-memory document and the
//! caller may retry with [persist].

use time::OffsetDateTime;

use crate::{
    Error,
    ledger::{
        Category, CategoryId, CategoryName, Document, Income, IncomeSource, NewTransaction, Transaction,
        domain::{new_id, validate_expense, validate_finite, validate_income},
    },
    store::DocumentStore,
};

/// Load the stored document, or the seed document if nothing has been stored.
///
/// # Errors
///
/// Returns a persistence error if the store cannot be read.
pub fn load_or_initialize(store: &impl DocumentStore) -> Result<Document, Error> {
    let Some(document) = store.load()? else {
        tracing::info!("no stored ledger document, starting from the default categories");
        return Ok(Document::seed());
    };

    for mismatch in document.spent_mismatches() {
        tracing::warn!(
            "category {} has spent {} but its transactions sum to {}",
            mismatch.category_id,
            mismatch.stored,
            mismatch.replayed
        );
    }

    Ok(document)
}

/// Save `document` through `store`.
pub fn persist(document: &Document, store: &mut impl DocumentStore) -> Result<(), Error> {
    store
        .save(document)
        .inspect_err(|error| tracing::error!("could not save the ledger document: {error}"))
}

/// Record a new income. Alias for [append_income].
pub fn record_income(
    document: &mut Document,
    store: &mut impl DocumentStore,
    source: IncomeSource,
    amount: f64,
    timestamp: OffsetDateTime,
) -> Result<Income, Error> {
    append_income(document, store, source, amount, timestamp)
}

/// Add an income entry to the end of the income history.
///
/// # Errors
///
/// Returns [Error::NonFiniteAmount] if `amount` is NaN or infinite and
/// [Error::NegativeIncome] if it is below zero.
pub fn append_income(
    document: &mut Document,
    store: &mut impl DocumentStore,
    source: IncomeSource,
    amount: f64,
    timestamp: OffsetDateTime,
) -> Result<Income, Error> {
    let amount = validate_income(amount)?;
    let income = Income {
        id: fresh_id(document),
        source,
        amount,
        date: timestamp,
    };

    document.incomes.push(income.clone());
    persist(document, store)?;

    Ok(income)
}

/// Replace every stored income with one entry per given source.
///
/// This is how the budget form saves incomes: what is on the form becomes the
/// entire income history.
///
/// # Errors
///
/// Returns a validation error if any amount is negative or not finite, or a
/// source appears more than once. The document is unchanged in that case.
pub fn replace_incomes(
    document: &mut Document,
    store: &mut impl DocumentStore,
    entries: &[(IncomeSource, f64)],
    timestamp: OffsetDateTime,
) -> Result<Vec<Income>, Error> {
    validate_income_entries(entries)?;

    let incomes = new_incomes(document, entries, timestamp);
    document.incomes = incomes.clone();
    persist(document, store)?;

    Ok(incomes)
}

/// Replace the incomes and set several category allocations with one save.
///
/// # Errors
///
/// Returns the first validation or [Error::CategoryNotFound] error found in
/// `incomes` or `allocations`. Nothing is changed or saved on error.
pub fn save_budget(
    document: &mut Document,
    store: &mut impl DocumentStore,
    incomes: &[(IncomeSource, f64)],
    allocations: &[(CategoryId, f64)],
    timestamp: OffsetDateTime,
) -> Result<(), Error> {
    validate_income_entries(incomes)?;
    for (category_id, amount) in allocations {
        validate_finite(*amount)?;
        if document.category(category_id).is_none() {
            return Err(Error::CategoryNotFound(category_id.clone()));
        }
    }

    document.incomes = new_incomes(document, incomes, timestamp);
    for (category_id, amount) in allocations {
        if let Some(category) = document.category_mut(category_id) {
            category.allocated = *amount;
        }
    }

    persist(document, store)
}

fn validate_income_entries(entries: &[(IncomeSource, f64)]) -> Result<(), Error> {
    for (index, (source, amount)) in entries.iter().enumerate() {
        validate_income(*amount)?;

        if entries[..index].iter().any(|(other, _)| other == source) {
            return Err(Error::DuplicateIncomeSource(*source));
        }
    }

    Ok(())
}

fn new_incomes(
    document: &Document,
    entries: &[(IncomeSource, f64)],
    timestamp: OffsetDateTime,
) -> Vec<Income> {
    let mut incomes: Vec<Income> = Vec::with_capacity(entries.len());

    for (source, amount) in entries {
        let id = loop {
            let id = fresh_id(document);
            if incomes.iter().all(|income| income.id != id) {
                break id;
            }
        };

        incomes.push(Income {
            id,
            source: *source,
            amount: *amount,
            date: timestamp,
        });
    }

    incomes
}

/// Set the budget allocated to a category.
///
/// # Errors
///
/// Returns [Error::NonFiniteAmount] for a NaN or infinite `amount` and
/// [Error::CategoryNotFound] if no category has the ID `category_id`. Nothing
/// is changed or saved on error.
pub fn set_category_allocation(
    document: &mut Document,
    store: &mut impl DocumentStore,
    category_id: &str,
    amount: f64,
) -> Result<Category, Error> {
    let amount = validate_finite(amount)?;
    let category = document
        .category_mut(category_id)
        .ok_or_else(|| Error::CategoryNotFound(category_id.to_owned()))?;

    category.allocated = amount;
    let category = category.clone();
    persist(document, store)?;

    Ok(category)
}

/// Append a new, empty category.
///
/// # Errors
///
/// Returns [Error::EmptyCategoryName] if `name` is empty after trimming.
pub fn add_category(
    document: &mut Document,
    store: &mut impl DocumentStore,
    name: &str,
) -> Result<Category, Error> {
    let name = CategoryName::new(name)?;
    let category = Category {
        id: fresh_id(document),
        name,
        allocated: 0.0,
        spent: 0.0,
    };

    document.categories.push(category.clone());
    persist(document, store)?;

    Ok(category)
}

/// Record an expense and add it to its category's spent total.
///
/// A transaction whose category does not exist is still recorded but changes
/// no category.
///
/// # Errors
///
/// Returns a validation error if the amount is not a finite, positive number.
pub fn record_transaction(
    document: &mut Document,
    store: &mut impl DocumentStore,
    new_transaction: NewTransaction,
) -> Result<Transaction, Error> {
    let amount = validate_expense(new_transaction.amount)?;
    let transaction = Transaction {
        id: fresh_id(document),
        description: new_transaction.description,
        amount,
        date: new_transaction.date,
        category_id: new_transaction.category_id,
    };

    match document.category_mut(&transaction.category_id) {
        Some(category) => category.spent += amount,
        None => tracing::warn!(
            "recording transaction against unknown category {}",
            transaction.category_id
        ),
    }
    document.transactions.push(transaction.clone());
    persist(document, store)?;

    Ok(transaction)
}

fn fresh_id(document: &Document) -> String {
    loop {
        let id = new_id();
        if !document.contains_id(&id) {
            return id;
        }
    }
}



#[cfg(test)]
mod allocation_tests {
    use crate::{
        Error,
        ledger::{Document, set_category_allocation},
        store::MemoryStore,
    };

    #[test]
    fn sets_allocation_and_persists() {
        let mut document = Document::seed();
        let mut store = MemoryStore::new();

        let category = set_category_allocation(&mut document, &mut store, "2", 80000.0).unwrap();

        assert_eq!(category.allocated, 80000.0);
        assert_eq!(document.category("2").unwrap().allocated, 80000.0);
        assert_eq!(store.save_count(), 1);
    }

    #[test]
    fn negative_allocations_are_kept() {
        let mut document = Document::seed();
        let mut store = MemoryStore::new();

        set_category_allocation(&mut document, &mut store, "1", -5.0).unwrap();

        assert_eq!(document.category("1").unwrap().allocated, -5.0);
    }

    #[test]
    fn unknown_category_is_not_found_and_leaves_document_untouched() {
        let mut document = Document::seed();
        let mut store = MemoryStore::with_document(&document).unwrap();
        let before = serde_json::to_string(&document).unwrap();

        let result = set_category_allocation(&mut document, &mut store, "nope", 10.0);

        assert_eq!(result, Err(Error::CategoryNotFound("nope".to_owned())));
        assert_eq!(serde_json::to_string(&document).unwrap(), before);
        assert_eq!(store.json(), Some(before.as_str()));
        assert_eq!(store.save_count(), 0);
    }

    #[test]
    fn non_finite_allocation_is_rejected() {
        let mut document = Document::seed();
        let mut store = MemoryStore::new();

        let result = set_category_allocation(&mut document, &mut store, "1", f64::NAN);

        assert!(matches!(result, Err(Error::NonFiniteAmount(_))));
        assert_eq!(document, Document::seed());
    }
}

#[cfg(test)]
mod save_budget_tests {
    use time::macros::datetime;

    use crate::{
        Error,
        ledger::{Document, IncomeSource, save_budget, total_allocated, total_income},
        store::MemoryStore,
    };

    #[test]
    fn saves_incomes_and_allocations_once() {
        let mut document = Document::seed();
        let mut store = MemoryStore::new();

        save_budget(
            &mut document,
            &mut store,
            &[(IncomeSource::Husband, 300000.0), (IncomeSource::Wife, 250000.0)],
            &[("1".to_owned(), 60000.0), ("2".to_owned(), 120000.0)],
            datetime!(2025-03-01 09:00 UTC),
        )
        .unwrap();

        assert_eq!(total_income(&document), 550000.0);
        assert_eq!(total_allocated(&document), 180000.0);
        assert_eq!(store.save_count(), 1);
    }

    #[test]
    fn unknown_category_rejects_the_whole_form() {
        let mut document = Document::seed();
        let mut store = MemoryStore::new();

        let result = save_budget(
            &mut document,
            &mut store,
            &[(IncomeSource::Other, 100.0)],
            &[("1".to_owned(), 50.0), ("missing".to_owned(), 10.0)],
            datetime!(2025-03-01 09:00 UTC),
        );

        assert_eq!(result, Err(Error::CategoryNotFound("missing".to_owned())));
        assert_eq!(document, Document::seed());
        assert_eq!(store.save_count(), 0);
    }

    #[test]
    fn negative_income_rejects_the_whole_form() {
        let mut document = Document::seed();
        let mut store = MemoryStore::new();

        let result = save_budget(
            &mut document,
            &mut store,
            &[(IncomeSource::Husband, 300000.0), (IncomeSource::Wife, -5000.0)],
            &[("1".to_owned(), 50.0)],
            datetime!(2025-03-01 09:00 UTC),
        );

        assert_eq!(result, Err(Error::NegativeIncome(-5000.0)));
        assert_eq!(document, Document::seed());
        assert_eq!(store.save_count(), 0);
    }

    #[test]
    fn non_finite_income_rejects_the_whole_form() {
        let mut document = Document::seed();
        let mut store = MemoryStore::new();

        let result = save_budget(
            &mut document,
            &mut store,
            &[(IncomeSource::Husband, f64::INFINITY)],
            &[("1".to_owned(), 50.0)],
            datetime!(2025-03-01 09:00 UTC),
        );

        assert!(matches!(result, Err(Error::NonFiniteAmount(_))));
        assert_eq!(document, Document::seed());
    }
}
