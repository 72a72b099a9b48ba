//! Alert system for displaying success and error messages to users.
//!
//! Alerts are swapped into the `#alert-container` element that [crate::html::base]
//! places at the bottom of every page.

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use maud::{Markup, html};

/// An alert message with an optional line of details.
#[derive(Debug, Clone, PartialEq)]
pub enum Alert {
    Success { message: String, details: String },
    SuccessSimple { message: String },
    Error { message: String, details: String },
    ErrorSimple { message: String },
}

impl Alert {
    pub fn into_html(self) -> Markup {
        let (is_success, message, details) = match self {
            Alert::Success { message, details } => (true, message, Some(details)),
            Alert::SuccessSimple { message } => (true, message, None),
            Alert::Error { message, details } => (false, message, Some(details)),
            Alert::ErrorSimple { message } => (false, message, None),
        };

        let container_style = if is_success {
            "flex items-start gap-3 p-4 text-sm rounded-lg border shadow-lg \
            text-green-800 bg-green-50 border-green-300 \
            dark:bg-gray-800 dark:text-green-400 dark:border-green-800"
        } else {
            "flex items-start gap-3 p-4 text-sm rounded-lg border shadow-lg \
            text-red-800 bg-red-50 border-red-300 \
            dark:bg-gray-800 dark:text-red-400 dark:border-red-800"
        };

        html! {
            div
                role="alert"
                class=(container_style)
                data-alert-kind=(if is_success { "success" } else { "error" })
            {
                div class="flex-1"
                {
                    p class="font-semibold" { (message) }

                    @if let Some(details) = details.filter(|details| !details.is_empty()) {
                        span class="block mt-1" { (details) }
                    }
                }

                button
                    type="button"
                    class="ms-auto -mx-1.5 -my-1.5 rounded-lg p-1.5 inline-flex items-center justify-center h-8 w-8"
                    aria-label="Close"
                    onclick="this.closest('[role=alert]').remove()"
                {
                    "×"
                }
            }
        }
    }
}

impl IntoResponse for Alert {
    fn into_response(self) -> Response {
        (StatusCode::OK, Html(self.into_html().into_string())).into_response()
    }
}

#[cfg(test)]
mod alert_tests {
    use axum::{http::StatusCode, response::IntoResponse};
    use scraper::Selector;

    use crate::{
        alert::Alert,
        test_utils::{assert_valid_html, parse_html_fragment},
    };

    #[tokio::test]
    async fn success_alert_renders_message() {
        let response = Alert::SuccessSimple {
            message: "Category deleted".to_owned(),
        }
        .into_response();

        assert_eq!(response.status(), StatusCode::OK);
        let html = parse_html_fragment(response).await;
        assert_valid_html(&html);
        let alert = html
            .select(&Selector::parse("div[role=alert]").unwrap())
            .next()
            .expect("No alert found");
        assert_eq!(alert.value().attr("data-alert-kind"), Some("success"));
        let message = html
            .select(&Selector::parse("p").unwrap())
            .next()
            .expect("No message found")
            .text()
            .collect::<String>();
        assert_eq!(message, "Category deleted");
    }

    #[tokio::test]
    async fn error_alert_renders_details() {
        let response = Alert::Error {
            message: "Could not delete".to_owned(),
            details: "Try again".to_owned(),
        }
        .into_response();

        let html = parse_html_fragment(response).await;
        assert_valid_html(&html);
        let details = html
            .select(&Selector::parse("span").unwrap())
            .next()
            .expect("No details found")
            .text()
            .collect::<String>();
        assert_eq!(details, "Try again");
    }
}
