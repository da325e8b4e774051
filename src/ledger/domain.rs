//! Core ledger domain types: incomes, categories and transactions.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

use crate::Error;

/// Identifier for an income entry.
pub type IncomeId = String;

/// Identifier for a budget category.
///
/// Seeded categories use short numeric strings, categories created afterwards
/// use UUIDs.
pub type CategoryId = String;

/// Identifier for a transaction.
pub type TransactionId = String;

/// Generate a fresh identifier for a new ledger entity.
pub(crate) fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Who earned an income.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IncomeSource {
    /// The husband's earnings.
    Husband,
    /// The wife's earnings.
    Wife,
    /// Any other household income.
    Other,
}

impl IncomeSource {
    /// All income sources in display order.
    pub const ALL: [IncomeSource; 3] = [
        IncomeSource::Husband,
        IncomeSource::Wife,
        IncomeSource::Other,
    ];

    /// The label used in the stored document and in forms.
    pub fn as_str(&self) -> &'static str {
        match self {
            IncomeSource::Husband => "husband",
            IncomeSource::Wife => "wife",
            IncomeSource::Other => "other",
        }
    }

    /// A human friendly label for the views.
    pub fn display_name(&self) -> &'static str {
        match self {
            IncomeSource::Husband => "Husband's income",
            IncomeSource::Wife => "Wife's income",
            IncomeSource::Other => "Other income",
        }
    }
}

impl FromStr for IncomeSource {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "husband" => Ok(IncomeSource::Husband),
            "wife" => Ok(IncomeSource::Wife),
            "other" => Ok(IncomeSource::Other),
            other => Err(Error::InvalidIncomeSource(other.to_owned())),
        }
    }
}

impl Display for IncomeSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Money coming into the household.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Income {
    /// Unique among all IDs in the document.
    pub id: IncomeId,
    /// Who earned the income.
    pub source: IncomeSource,
    /// Finite and not negative.
    pub amount: f64,
    /// When the income was recorded.
    #[serde(with = "time::serde::rfc3339")]
    pub date: OffsetDateTime,
}

/// A validated, non-empty category name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Hash)]
#[serde(transparent)]
pub struct CategoryName(String);

impl CategoryName {
    /// Create a category name from `name` with surrounding whitespace removed.
    ///
    /// # Errors
    ///
    /// This function will return an [Error::EmptyCategoryName] if `name` is
    /// empty or only whitespace.
    pub fn new(name: &str) -> Result<Self, Error> {
        let name = name.trim();

        if name.is_empty() {
            Err(Error::EmptyCategoryName)
        } else {
            Ok(Self(name.to_string()))
        }
    }

    /// Create a category name without validation.
    ///
    /// The caller should ensure that the string is not empty.
    pub fn new_unchecked(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl AsRef<str> for CategoryName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for CategoryName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CategoryName::new(s)
    }
}

impl Display for CategoryName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A named budget bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    /// Unique among all IDs in the document.
    pub id: CategoryId,
    /// Not required to be unique.
    pub name: CategoryName,
    /// The budget assigned to this category for the current period.
    pub allocated: f64,
    /// The sum of all transactions recorded against this category.
    ///
    /// Only [record_transaction](crate::ledger::record_transaction) changes this value.
    pub spent: f64,
}

impl Category {
    /// The amount left to spend, negative when the category is over budget.
    pub fn balance(&self) -> f64 {
        self.allocated - self.spent
    }

    /// Whether more has been spent than was allocated.
    pub fn is_over_budget(&self) -> bool {
        self.spent > self.allocated
    }

    /// How much of the allocation has been used as a percentage.
    ///
    /// Categories without a positive allocation report 0%.
    pub fn usage_percent(&self) -> f64 {
        if self.allocated > 0.0 {
            self.spent / self.allocated * 100.0
        } else {
            0.0
        }
    }
}

/// An expense recorded against a category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Unique among all IDs in the document.
    pub id: TransactionId,
    /// May be empty.
    pub description: String,
    /// The size of the expense, always positive.
    pub amount: f64,
    /// The day the money was spent.
    #[serde(with = "iso_date")]
    pub date: Date,
    /// May refer to a category that does not exist.
    pub category_id: CategoryId,
}

/// The caller supplied fields of a transaction that has not been recorded yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    /// Must be finite and greater than zero.
    pub amount: f64,
    /// May be empty.
    pub description: String,
    /// The day the money was spent.
    pub date: Date,
    /// The category to charge, which need not exist.
    pub category_id: CategoryId,
}

/// Check that `amount` can be stored in the document.
pub(crate) fn validate_finite(amount: f64) -> Result<f64, Error> {
    if amount.is_finite() {
        Ok(amount)
    } else {
        Err(Error::NonFiniteAmount(amount))
    }
}

/// Check that `amount` is a usable income amount.
pub(crate) fn validate_income(amount: f64) -> Result<f64, Error> {
    let amount = validate_finite(amount)?;

    if amount >= 0.0 {
        Ok(amount)
    } else {
        Err(Error::NegativeIncome(amount))
    }
}

/// Check that `amount` is a usable expense magnitude.
pub(crate) fn validate_expense(amount: f64) -> Result<f64, Error> {
    let amount = validate_finite(amount)?;

    if amount > 0.0 {
        Ok(amount)
    } else {
        Err(Error::NonPositiveAmount(amount))
    }
}

/// (De)serialize a [Date] as `YYYY-MM-DD`.
pub mod iso_date {
    use serde::{Deserialize, Deserializer, Serializer, de, ser};
    use time::{Date, format_description::BorrowedFormatItem, macros::format_description};

    const FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

    /// Write `date` as `YYYY-MM-DD`.
    pub fn serialize<S: Serializer>(date: &Date, serializer: S) -> Result<S::Ok, S::Error> {
        let text = date.format(FORMAT).map_err(ser::Error::custom)?;
        serializer.serialize_str(&text)
    }

    /// Read a `YYYY-MM-DD` string.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Date, D::Error> {
        let text = String::deserialize(deserializer)?;
        Date::parse(&text, FORMAT).map_err(de::Error::custom)
    }
}
