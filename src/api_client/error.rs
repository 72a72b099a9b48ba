//! Errors returned by the REST API client.

use reqwest::StatusCode;
use serde::Deserialize;

/// The ways a request to the REST API can fail.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ApiError {
    /// The API rejected the bearer token (HTTP 401).
    #[error("the API rejected the session token")]
    Unauthorized,

    /// The requested record does not exist (HTTP 404).
    #[error("the API could not find the requested record")]
    NotFound,

    /// The request conflicts with existing records (HTTP 409).
    #[error("the API reported a conflict: {0:?}")]
    Conflict(Option<String>),

    /// The API rejected the request body (HTTP 400).
    #[error("the API rejected the request: {0:?}")]
    BadRequest(Option<String>),

    /// Too many failed log-in attempts (HTTP 429).
    #[error("too many attempts: {0}")]
    TooManyRequests(String),

    /// Any other unsuccessful status code along with the response body.
    #[error("the API responded with status {0}: {1}")]
    Status(u16, String),

    /// The API could not be reached.
    #[error("could not reach the API: {0}")]
    Transport(String),

    /// The response body could not be decoded.
    #[error("could not decode the API response: {0}")]
    Decode(String),
}

/// The JSON error body produced by the API framework.
#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
    error: Option<String>,
}

/// Extract a human readable message from an error response body.
///
/// Plain text bodies are used as is. JSON bodies use the `message` field,
/// falling back to the `error` field.
pub(super) fn error_message(body: &str) -> Option<String> {
    let body = body.trim();

    if body.is_empty() {
        return None;
    }

    match serde_json::from_str::<ErrorBody>(body) {
        Ok(ErrorBody { message, error }) => message
            .or(error)
            .map(|message| message.trim().to_owned())
            .filter(|message| !message.is_empty()),
        Err(_) if body.starts_with('{') || body.starts_with('<') => None,
        Err(_) => Some(body.to_owned()),
    }
}

impl ApiError {
    pub(super) fn from_status(status: StatusCode, body: &str) -> Self {
        let message = error_message(body);

        match status {
            StatusCode::UNAUTHORIZED => ApiError::Unauthorized,
            StatusCode::NOT_FOUND => ApiError::NotFound,
            StatusCode::CONFLICT => ApiError::Conflict(message),
            StatusCode::BAD_REQUEST => ApiError::BadRequest(message),
            StatusCode::TOO_MANY_REQUESTS => ApiError::TooManyRequests(message.unwrap_or_else(
                || "Too many attempts. Wait a few minutes and try again.".to_owned(),
            )),
            status => ApiError::Status(
                status.as_u16(),
                message.unwrap_or_else(|| "Server failure".to_owned()),
            ),
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            ApiError::Decode(error.to_string())
        } else {
            ApiError::Transport(error.to_string())
        }
    }
}
