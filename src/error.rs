//! Defines the app level error type and conversions to rendered HTML pages and alerts.
use axum::{
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use axum_htmx::HxRedirect;

use crate::{
    alert::Alert, api_client::ApiError, endpoints, internal_server_error::InternalServerError,
    not_found::NotFoundError,
};

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The email and password combination was rejected by the API.
    #[error("invalid email or password")]
    InvalidCredentials,

    /// The session cookie is missing from the cookie jar in the request.
    #[error("no cookies in the cookie jar :(")]
    CookieMissing,

    /// The session cookie could not be decoded.
    #[error("could not read session cookie: {0}")]
    InvalidCookie(String),

    /// The API rejected the session token, e.g. because it expired.
    ///
    /// The client should be logged out and sent back to the log-in page.
    #[error("the API session has expired")]
    SessionExpired,

    /// A mutating action was attempted with the demo account.
    #[error("this feature is locked in demo mode")]
    DemoMode,

    /// The user provided a password that is too easy to guess.
    #[error("password is too weak: {0}")]
    TooWeak(String),

    /// The CPF does not have valid check digits.
    #[error("Invalid CPF. Check the digits and try again.")]
    InvalidCpf,

    /// A required text field was empty after trimming whitespace.
    #[error("{0} cannot be empty")]
    EmptyField(&'static str),

    /// A money amount was zero or negative where a positive amount is required.
    #[error("Amount must be greater than zero")]
    NonPositiveAmount,

    /// A day of the month outside of 1-31.
    #[error("{0} is not a valid day of the month, use a day between 1 and 31")]
    InvalidDayOfMonth(u8),

    /// The last four digits of a credit card were not exactly four digits.
    #[error("The last four digits must be exactly four numbers")]
    InvalidLastFourDigits,

    /// A colour that is not a hex colour of the form `#rrggbb`.
    #[error("\"{0}\" is not a valid colour")]
    InvalidColor(String),

    /// A new transaction was submitted without an account or credit card.
    #[error("Choose an account or credit card for the transaction")]
    MissingTransactionSource,

    /// The account or credit card selection could not be parsed.
    #[error("\"{0}\" is not a valid account or credit card")]
    InvalidTransactionSource(String),

    /// An income transaction was charged to a credit card.
    #[error("Income cannot be added to a credit card, choose an account instead")]
    CreditCardIncome,

    /// The chosen category does not exist or has a different type from the transaction.
    #[error("The selected category does not match the transaction type")]
    CategoryTypeMismatch,

    /// The bulk category form was submitted without choosing a category.
    #[error("Choose a category for the selected transactions")]
    MissingCategory,

    /// No transactions were selected for a bulk operation.
    #[error("no transactions were selected")]
    EmptySelection,

    /// The multipart form could not be parsed.
    #[error("Could not parse multipart form: {0}")]
    MultipartError(String),

    /// The uploaded profile picture is not an image.
    #[error("File is not an image")]
    NotAnImage,

    /// The requested resource was not found.
    ///
    /// For HTTP request handlers, the client should check that the parameters
    /// (e.g., ID) are correct and that the resource has been created.
    #[error("the requested resource could not be found")]
    NotFound,

    /// The API refused the request, see [ApiError] for the details.
    #[error(transparent)]
    Api(ApiError),

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezoneError(String),

    /// An error occurred while serializing a struct as JSON
    #[error("could not serialize as JSON: {0}")]
    JSONSerializationError(String),
}

impl From<ApiError> for Error {
    fn from(value: ApiError) -> Self {
        match value {
            ApiError::Unauthorized => Error::SessionExpired,
            ApiError::NotFound => Error::NotFound,
            error => Error::Api(error),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound => NotFoundError.into_response(),
            Error::SessionExpired => {
                tracing::info!("API session expired, logging out");
                Redirect::to(endpoints::LOG_OUT).into_response()
            }
            Error::InvalidTimezoneError(timezone) => InternalServerError {
                description: "Invalid Timezone Settings",
                fix: &format!(
                    "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to valid, canonical timezone string"
                ),
            }
            .into_response(),
            Error::Api(ApiError::Transport(error)) => {
                tracing::error!("Could not reach the API: {error}");
                InternalServerError {
                    description: "Could not reach the server",
                    fix: "Check that the API server is running and try again.",
                }
                .into_response()
            }
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                InternalServerError::default().into_response()
            }
        }
    }
}

impl Error {
    /// Convert the error into an HTTP response with an HTML alert.
    pub fn into_alert_response(self) -> Response {
        let (status_code, alert) = match self {
            Error::SessionExpired => {
                tracing::info!("API session expired, logging out");
                return (
                    HxRedirect(endpoints::LOG_OUT.to_owned()),
                    StatusCode::SEE_OTHER,
                )
                    .into_response();
            }
            Error::DemoMode => (
                StatusCode::FORBIDDEN,
                Alert::Error {
                    message: "Locked in demo mode".to_owned(),
                    details: "This feature is locked in demo mode.".to_owned(),
                },
            ),
            Error::InvalidTimezoneError(timezone) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Alert::Error {
                    message: "Invalid Timezone Settings".to_owned(),
                    details: format!(
                        "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to valid, canonical timezone string"
                    ),
                },
            ),
            Error::NotFound => (
                StatusCode::NOT_FOUND,
                Alert::Error {
                    message: "Not found".to_owned(),
                    details: "The item could not be found. \
                    Try refreshing the page to see if it has already been deleted."
                        .to_owned(),
                },
            ),
            Error::EmptySelection => (
                StatusCode::BAD_REQUEST,
                Alert::ErrorSimple {
                    message: "Select at least one transaction".to_owned(),
                },
            ),
            Error::Api(ApiError::Conflict(message)) => (
                StatusCode::CONFLICT,
                Alert::Error {
                    message: "Conflict".to_owned(),
                    details: message.unwrap_or_else(|| {
                        "The request conflicts with existing records.".to_owned()
                    }),
                },
            ),
            Error::Api(ApiError::BadRequest(message)) => (
                StatusCode::BAD_REQUEST,
                Alert::Error {
                    message: "Invalid data".to_owned(),
                    details: message.unwrap_or_else(|| "Check the form and try again.".to_owned()),
                },
            ),
            Error::Api(ApiError::Transport(error)) => {
                tracing::error!("Could not reach the API: {error}");
                (
                    StatusCode::BAD_GATEWAY,
                    Alert::Error {
                        message: "Connection error".to_owned(),
                        details: "Check that the API server is running.".to_owned(),
                    },
                )
            }
            error @ (Error::EmptyField(_)
            | Error::NonPositiveAmount
            | Error::InvalidDayOfMonth(_)
            | Error::InvalidLastFourDigits
            | Error::InvalidColor(_)
            | Error::MissingTransactionSource
            | Error::InvalidTransactionSource(_)
            | Error::CreditCardIncome
            | Error::CategoryTypeMismatch
            | Error::MissingCategory
            | Error::NotAnImage
            | Error::MultipartError(_)) => (
                StatusCode::BAD_REQUEST,
                Alert::ErrorSimple {
                    message: error.to_string(),
                },
            ),
            error => {
                tracing::error!("An unexpected error occurred: {error}");
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

#[cfg(test)]
mod error_tests {
    use axum::{http::StatusCode, response::IntoResponse};

    use crate::{
        Error,
        api_client::ApiError,
        endpoints,
        test_utils::{assert_hx_redirect, assert_valid_html, get_header, parse_html_fragment},
    };

    #[test]
    fn unauthorized_api_error_expires_session() {
        assert_eq!(Error::from(ApiError::Unauthorized), Error::SessionExpired);
        assert_eq!(Error::from(ApiError::NotFound), Error::NotFound);
        assert_eq!(
            Error::from(ApiError::Conflict(None)),
            Error::Api(ApiError::Conflict(None))
        );
    }

    #[tokio::test]
    async fn session_expired_page_redirects_to_log_out() {
        let response = Error::SessionExpired.into_response();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(get_header(&response, "location"), endpoints::LOG_OUT);
    }

    #[tokio::test]
    async fn session_expired_alert_uses_hx_redirect() {
        let response = Error::SessionExpired.into_alert_response();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_hx_redirect(&response, endpoints::LOG_OUT);
    }

    #[tokio::test]
    async fn demo_mode_alert_is_forbidden() {
        let response = Error::DemoMode.into_alert_response();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        let html = parse_html_fragment(response).await;
        assert_valid_html(&html);
        let text = html.root_element().text().collect::<String>();
        assert!(text.contains("This feature is locked in demo mode."));
    }

    #[tokio::test]
    async fn conflict_alert_shows_api_message() {
        let response = Error::Api(ApiError::Conflict(Some("Email taken".to_owned())))
            .into_alert_response();

        assert_eq!(response.status(), StatusCode::CONFLICT);
        let html = parse_html_fragment(response).await;
        let text = html.root_element().text().collect::<String>();
        assert!(text.contains("Email taken"));
    }
}
