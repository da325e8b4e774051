//! Alert messages shown after a form submission succeeds or fails.

use maud::{Markup, html};

/// An alert message with a short summary and optional details.
#[derive(Debug, Clone, PartialEq)]
pub enum Alert {
    Success { message: String, details: String },
    Error { message: String, details: String },
}

impl Alert {
    /// Render the alert inline.
    pub fn into_markup(self) -> Markup {
        let (message, details, style) = match self {
            Alert::Success { message, details } => (
                message,
                details,
                "p-4 mb-4 text-sm text-green-800 rounded-lg bg-green-50 \
                dark:bg-gray-800 dark:text-green-400",
            ),
            Alert::Error { message, details } => (
                message,
                details,
                "p-4 mb-4 text-sm text-red-800 rounded-lg bg-red-50 \
                dark:bg-gray-800 dark:text-red-400",
            ),
        };

        html! {
            div class=(style) role="alert"
            {
                span class="font-medium" { (message) }

                @if !details.is_empty() {
                    " " (details)
                }
            }
        }
    }

    /// Render the alert as an out-of-band swap into the page's alert container.
    pub fn into_html(self) -> Markup {
        html! {
            div
                id="alert-container"
                hx-swap-oob="true"
                class="w-full max-w-md px-4"
                style="position: fixed; bottom: 1rem; left: 50%; transform: translateX(-50%); z-index: 9999;"
            {
                (self.into_markup())
            }
        }
    }
}
