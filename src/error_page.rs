//! Full page responses for errors that stop a page from rendering.
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use crate::html::error_view;

/// A full error page.
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorPage<'a> {
    /// The route or resource does not exist.
    NotFound,
    /// Something went wrong on the server.
    Internal { description: &'a str, fix: &'a str },
}

impl ErrorPage<'_> {
    /// The generic internal error page.
    pub fn internal() -> Self {
        ErrorPage::Internal {
            description: "Sorry, something went wrong.",
            fix: "Try again later or check the server logs",
        }
    }
}

impl IntoResponse for ErrorPage<'_> {
    fn into_response(self) -> Response {
        let (status_code, markup) = match self {
            ErrorPage::NotFound => (
                StatusCode::NOT_FOUND,
                error_view(
                    "Not Found",
                    "404",
                    "Page not found.",
                    "Sorry, we can't find that page. Head back to the dashboard to find your budget.",
                ),
            ),
            ErrorPage::Internal { description, fix } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                error_view("Internal Server Error", "500", description, fix),
            ),
        };

        (status_code, Html(markup.into_string())).into_response()
    }
}

/// Fallback handler for unknown routes.
pub async fn get_404_not_found() -> Response {
    ErrorPage::NotFound.into_response()
}
