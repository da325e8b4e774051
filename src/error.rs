//! Defines the app level error type and conversions to rendered HTML pages and alerts.
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{
    alert::Alert,
    error_page::ErrorPage,
    ledger::{CategoryId, IncomeSource},
};

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// An amount was NaN or infinite.
    #[error("{0} is not a valid amount")]
    NonFiniteAmount(f64),

    /// An expense was zero or negative.
    ///
    /// Transactions record money going out, so the amount must be greater
    /// than zero.
    #[error("the amount must be greater than zero, got {0}")]
    NonPositiveAmount(f64),

    /// An income amount was below zero.
    #[error("income cannot be negative, got {0}")]
    NegativeIncome(f64),

    /// An empty string was used to create a category name.
    #[error("Category name cannot be empty")]
    EmptyCategoryName,

    /// The income source is not one of "husband", "wife" or "other".
    #[error("\"{0}\" is not a valid income source")]
    InvalidIncomeSource(String),

    /// The same income source was given more than once when replacing incomes.
    #[error("the income source \"{0}\" was given more than once")]
    DuplicateIncomeSource(IncomeSource),

    /// The budget form sent a different number of category IDs and allocations.
    #[error("every category needs exactly one allocation")]
    MismatchedAllocations,

    /// The category ID does not match any category in the document.
    #[error("could not find a category with the ID \"{0}\"")]
    CategoryNotFound(CategoryId),

    /// The document store could not be read or its contents could not be parsed.
    #[error("could not load the ledger document: {0}")]
    StoreRead(String),

    /// The document store could not be written.
    ///
    /// The in-memory document keeps the change, so the save can be retried.
    #[error("could not save the ledger document: {0}")]
    StoreWrite(String),

    /// An error occurred while serializing a struct as JSON
    #[error("could not serialize as JSON: {0}")]
    JSONSerializationError(String),

    /// Could not acquire the ledger lock
    #[error("could not acquire the ledger lock")]
    LedgerLockError,
}

/// The broad class of an [Error], for callers that only need to know how to
/// react rather than what exactly went wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The input was rejected before anything changed.
    Validation,
    /// The input referred to something that does not exist.
    NotFound,
    /// The store failed to load or save the document.
    Persistence,
    /// A bug or poisoned lock.
    Internal,
}

impl Error {
    /// The [ErrorKind] of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::NonFiniteAmount(_)
            | Error::NonPositiveAmount(_)
            | Error::NegativeIncome(_)
            | Error::EmptyCategoryName
            | Error::InvalidIncomeSource(_)
            | Error::DuplicateIncomeSource(_)
            | Error::MismatchedAllocations => ErrorKind::Validation,
            Error::CategoryNotFound(_) => ErrorKind::NotFound,
            Error::StoreRead(_) | Error::StoreWrite(_) | Error::JSONSerializationError(_) => {
                ErrorKind::Persistence
            }
            Error::LedgerLockError => ErrorKind::Internal,
        }
    }

    /// Whether the error is the user's input being turned away rather than a
    /// server fault. Rejections are logged at debug level.
    pub fn is_rejection(&self) -> bool {
        matches!(self.kind(), ErrorKind::Validation | ErrorKind::NotFound)
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::CategoryNotFound(_) => ErrorPage::NotFound.into_response(),
            Error::StoreWrite(error) => {
                tracing::error!("Could not save the ledger: {error}");
                ErrorPage::Internal {
                    description: "Save Failed",
                    fix: "Your changes could not be saved. Please try again.",
                }
                .into_response()
            }
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                ErrorPage::internal().into_response()
            }
        }
    }
}

impl Error {
    /// Convert the error into an HTTP response with an HTML alert.
    pub fn into_alert_response(self) -> Response {
        let (status_code, alert) = match self.kind() {
            ErrorKind::Validation => (
                StatusCode::BAD_REQUEST,
                Alert::Error {
                    message: "Invalid input".to_owned(),
                    details: capitalise_first_char(&self.to_string()),
                },
            ),
            ErrorKind::NotFound => (
                StatusCode::NOT_FOUND,
                Alert::Error {
                    message: "Category not found".to_owned(),
                    details: "The category could not be found. \
                    Try refreshing the page to see the current categories."
                        .to_owned(),
                },
            ),
            ErrorKind::Persistence => {
                tracing::error!("Could not save or load the ledger: {self}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Alert::Error {
                        message: "Could not save your changes".to_owned(),
                        details: "The ledger could not be saved, check the server logs for \
                        more details and try again."
                            .to_owned(),
                    },
                )
            }
            ErrorKind::Internal => {
                tracing::error!("An unexpected error occurred: {self}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Alert::Error {
                        message: "Something went wrong".to_owned(),
                        details:
                            "An unexpected error occurred, check the server logs for more details."
                                .to_owned(),
                    },
                )
            }
        };

        (status_code, alert.into_html()).into_response()
    }
}

fn capitalise_first_char(string: &str) -> String {
    let mut chars = string.chars();
    let Some(first) = chars.next() else {
        return String::with_capacity(0);
    };
    first.to_uppercase().chain(chars).collect()
}
