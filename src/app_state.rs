//! Implements a struct that holds the state of the web server.

use axum::extract::FromRef;
use axum_extra::extract::cookie::Key;
use sha2::{Digest, Sha512};
use time::Duration;

use crate::{api_client::ApiClient, auth::DEFAULT_COOKIE_DURATION};

/// The state of the web server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The key to be used for signing and encrypting private cookies.
    pub cookie_key: Key,

    /// The duration for which cookies used for authentication are valid.
    pub cookie_duration: Duration,

    /// The local timezone as a canonical timezone name, e.g. "America/Sao_Paulo".
    pub local_timezone: String,

    /// The client for the REST API that stores the user's data.
    pub api: ApiClient,
}

impl AppState {
    /// Create a new [AppState] that talks to the REST API at `api_url`.
    ///
    /// `local_timezone` should be a valid, canonical timezone name, e.g. "America/Sao_Paulo".
    pub fn new(cookie_secret: &str, local_timezone: &str, api_url: &str) -> Self {
        Self {
            cookie_key: create_cookie_key(cookie_secret),
            cookie_duration: DEFAULT_COOKIE_DURATION,
            local_timezone: local_timezone.to_owned(),
            api: ApiClient::new(api_url),
        }
    }
}

// this impl tells `PrivateCookieJar` how to access the key from our state
impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.cookie_key.clone()
    }
}

impl FromRef<AppState> for ApiClient {
    fn from_ref(state: &AppState) -> Self {
        state.api.clone()
    }
}

/// Create a signing key for cookies from a `secret`s string.
pub fn create_cookie_key(secret: &str) -> Key {
    let hash = Sha512::digest(secret);

    Key::from(&hash)
}

/// The state shared by the page and endpoint handlers that read from or write to the API.
///
/// Handlers receive the API token from the session placed in the request by the auth guard.
#[derive(Debug, Clone)]
pub struct ApiState {
    pub api: ApiClient,
    /// The local timezone as a canonical timezone name, e.g. "America/Sao_Paulo".
    pub local_timezone: String,
}

impl FromRef<AppState> for ApiState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            api: state.api.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}
