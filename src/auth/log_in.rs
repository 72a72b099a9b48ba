//! This file defines the routes for displaying the log-in page and handling log-in requests.
//! The auth module handles the lower level session and cookie logic.

use axum::{
    Form,
    extract::{FromRef, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::{PrivateCookieJar, cookie::Key};
use axum_htmx::HxRedirect;
use maud::{Markup, html};
use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};

use crate::{
    AppState, Error,
    alert::Alert,
    api_client::{ApiClient, ApiError},
    auth::{
        DEMO_EMAIL, DEMO_PASSWORD, Session, get_current_user, invalidate_session_cookie,
        normalize_redirect_url, set_session_cookie,
    },
    endpoints,
    html::{
        BUTTON_SECONDARY_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, base, loading_spinner,
        log_in_register, password_input,
    },
};

/// The message shown for any rejected email and password combination.
pub const INVALID_CREDENTIALS_ERROR_MSG: &str = "Incorrect email or password.";

/// The message shown when the API cannot be reached.
pub const CONNECTION_ERROR_MSG: &str = "Connection error. Check that the server is running.";

const INTERNAL_ERROR_MSG: &str = "An internal error occurred. Please try again later.";

pub(super) fn email_input(email: &str) -> Markup {
    html! {
        div
        {
            label for="email" class=(FORM_LABEL_STYLE) { "Email" }

            input
                type="email"
                name="email"
                id="email"
                placeholder="you@example.com"
                autocomplete="email"
                class=(FORM_TEXT_INPUT_STYLE)
                required
                value=(email);
        }
    }
}

fn log_in_form(email: &str, error_message: Option<&str>, redirect_url: Option<&str>) -> Markup {
    html! {
        form
            hx-post=(endpoints::LOG_IN_API)
            hx-indicator="#indicator"
            hx-disabled-elt="#email, #password, #submit-button"
            class="space-y-4 md:space-y-6"
        {
            @if let Some(redirect_url) = redirect_url {
                input type="hidden" name="redirect_url" value=(redirect_url);
            }

            (email_input(email))

            (password_input("", 0, error_message))

            div class="flex items-center gap-x-3"
            {
                input
                    type="checkbox"
                    name="remember_me"
                    id="remember_me"
                    tabindex="0"
                    class="rounded-xs";

                label
                    for="remember_me"
                    class="block text-sm font-medium text-gray-900 dark:text-white"
                {
                    "Keep me logged in for one week"
                }
            }

            button
                type="submit" id="submit-button" tabindex="0"
                class="w-full px-4 py-2 bg-blue-500 dark:bg-blue-600 disabled:bg-blue-700
                    hover:enabled:bg-blue-600 hover:enabled:dark:bg-blue-700 text-white rounded"
            {
                span class="inline htmx-indicator" id="indicator"
                {
                    (loading_spinner())
                }
                "Log in"
            }

            p class="text-sm font-light text-gray-500 dark:text-gray-400" {
                "Don't have an account? "
                a
                    href=(endpoints::REGISTER_VIEW) tabindex="0"
                    class="font-semibold leading-6 text-blue-600 hover:text-blue-500 dark:text-blue-500 dark:hover:text-blue-400"
                {
                  "Register here"
                }
            }
        }
    }
}

fn demo_button() -> Markup {
    html! {
        button
            type="button"
            id="demo-button"
            hx-post=(endpoints::DEMO_LOG_IN_API)
            hx-target-error="#alert-container"
            class=(BUTTON_SECONDARY_STYLE)
        {
            "Try the demo"
        }
    }
}

fn parse_redirect_url(raw_url: Option<&str>, source: &str) -> Option<String> {
    match raw_url.and_then(normalize_redirect_url) {
        Some(redirect_url) => Some(redirect_url),
        None => {
            if let Some(redirect_url) = raw_url {
                tracing::warn!("Invalid redirect URL from {source}: {redirect_url}");
            }
            None
        }
    }
}

/// Display the log-in page.
pub async fn get_log_in_page(Query(query): Query<RedirectQuery>) -> Response {
    let redirect_url = parse_redirect_url(query.redirect_url.as_deref(), "log-in query");
    let log_in_form = log_in_form("", None, redirect_url.as_deref());
    let content = html! {
        (log_in_form)
        (demo_button())
    };
    let content = log_in_register("Log in to your account", &content);
    base("Log In", &[], &content).into_response()
}

/// How long the session cookie should last if the user selects "remember me" at log-in.
const REMEMBER_ME_COOKIE_DURATION: Duration = Duration::days(7);

/// The state needed to perform a login.
#[derive(Debug, Clone)]
pub struct LoginState {
    /// The key to be used for signing and encrypting private cookies.
    pub cookie_key: Key,
    /// The duration for which cookies used for authentication are valid.
    pub cookie_duration: Duration,
    pub api: ApiClient,
}

impl FromRef<AppState> for LoginState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            cookie_key: state.cookie_key.clone(),
            cookie_duration: state.cookie_duration,
            api: state.api.clone(),
        }
    }
}

// this impl tells `PrivateCookieJar` how to access the key from our state
impl FromRef<LoginState> for Key {
    fn from_ref(state: &LoginState) -> Self {
        state.cookie_key.clone()
    }
}

/// The message to show the user when the API rejects a log-in attempt.
fn log_in_error_message(error: &ApiError) -> String {
    match error {
        ApiError::Unauthorized
        | ApiError::NotFound
        | ApiError::BadRequest(_)
        | ApiError::Status(403, _) => INVALID_CREDENTIALS_ERROR_MSG.to_owned(),
        ApiError::TooManyRequests(message) => message.clone(),
        ApiError::Transport(_) => CONNECTION_ERROR_MSG.to_owned(),
        error => {
            tracing::error!("Unhandled error while logging in: {error}");
            INTERNAL_ERROR_MSG.to_owned()
        }
    }
}

/// Load the user's profile with the new API token and store the session in the cookie jar.
async fn start_session(
    state: &LoginState,
    jar: PrivateCookieJar,
    api_token: String,
    cookie_duration: Duration,
) -> Result<PrivateCookieJar, Error> {
    let profile = get_current_user(&state.api, &api_token).await?;
    let session = Session {
        api_token,
        email: profile.email,
        name: profile.name,
        expires_at: OffsetDateTime::now_utc() + cookie_duration,
    };

    set_session_cookie(jar, &session)
}

/// Handler for log-in requests via the POST method.
///
/// On a successful log-in request, the session cookie is set and the client is redirected to
/// the requested page or the dashboard.
/// Otherwise, the form is returned with an error message explaining the problem.
pub async fn post_log_in(
    State(state): State<LoginState>,
    jar: PrivateCookieJar,
    Form(user_data): Form<LogInData>,
) -> Response {
    let redirect_url = parse_redirect_url(user_data.redirect_url.as_deref(), "log-in form");
    let redirect_url = redirect_url.as_deref();
    let email = user_data.email.trim();

    let api_token = match state.api.log_in(email, &user_data.password).await {
        Ok(token) => token,
        Err(error) => {
            tracing::debug!("Log-in rejected for {email}: {error}");
            let message = log_in_error_message(&error);
            return log_in_form(email, Some(&message), redirect_url).into_response();
        }
    };

    let cookie_duration = if user_data.remember_me.is_some() {
        REMEMBER_ME_COOKIE_DURATION
    } else {
        state.cookie_duration
    };

    match start_session(&state, jar.clone(), api_token, cookie_duration).await {
        Ok(updated_jar) => (
            StatusCode::SEE_OTHER,
            HxRedirect(redirect_url.unwrap_or(endpoints::DASHBOARD_VIEW).to_owned()),
            updated_jar,
        )
            .into_response(),
        Err(error) => {
            tracing::error!("Error starting session: {error}");
            (
                invalidate_session_cookie(jar),
                log_in_form(email, Some(INTERNAL_ERROR_MSG), redirect_url),
            )
                .into_response()
        }
    }
}

/// Log in with the shared demo account and redirect to the dashboard.
pub async fn post_demo_log_in(State(state): State<LoginState>, jar: PrivateCookieJar) -> Response {
    let result = match state.api.log_in(DEMO_EMAIL, DEMO_PASSWORD).await {
        Ok(api_token) => start_session(&state, jar, api_token, state.cookie_duration).await,
        Err(error) => {
            let message = log_in_error_message(&error);
            return (
                StatusCode::BAD_GATEWAY,
                Alert::Error {
                    message: "Could not open the demo".to_owned(),
                    details: message,
                }
                .into_html(),
            )
                .into_response();
        }
    };

    match result {
        Ok(updated_jar) => (
            StatusCode::SEE_OTHER,
            HxRedirect(endpoints::DASHBOARD_VIEW.to_owned()),
            updated_jar,
        )
            .into_response(),
        Err(error) => {
            tracing::error!("Error starting demo session: {error}");
            error.into_alert_response()
        }
    }
}

#[derive(Deserialize)]
pub struct RedirectQuery {
    pub redirect_url: Option<String>,
}

/// The raw data entered by the user in the log-in form.
///
/// The password is kept as a plain string and only forwarded to the API.
#[derive(Clone, Serialize, Deserialize)]
pub struct LogInData {
    pub email: String,

    /// Password entered during log-in.
    pub password: String,

    /// Whether to extend the initial session cookie duration.
    ///
    /// This value comes from a checkbox, so it either has a string value or is not set
    /// (see the [MDN docs](https://developer.mozilla.org/en-US/docs/Web/HTML/Element/input/checkbox#value_2)).
    /// The `Some` variant should be interpreted as `true` irregardless of the
    /// string value, and the `None` variant should be interpreted as `false`.
    pub remember_me: Option<String>,

    /// Optional URL to redirect to after logging in.
    /// Only accepted from the log-in form submission.
    pub redirect_url: Option<String>,
}


#[cfg(test)]
mod log_in_tests {
    use axum::{
        Form, Json, Router,
        body::Body,
        extract::State,
        http::{HeaderMap, Response, StatusCode},
        routing::{get, post},
    };
    use axum_extra::extract::{PrivateCookieJar, cookie::Key};
    use axum_test::TestServer;
    use serde_json::{Value, json};
    use sha2::{Digest, Sha512};
    use time::{Duration, OffsetDateTime};

    use crate::{
        api_client::ApiClient,
        auth::{COOKIE_TOKEN, DEFAULT_COOKIE_DURATION, DEMO_EMAIL, cookie::get_session_from_cookies},
        endpoints,
        test_utils::{assert_hx_redirect, parse_html_fragment, spawn_mock_api},
    };

    use super::{
        INVALID_CREDENTIALS_ERROR_MSG, LogInData, LoginState, REMEMBER_ME_COOKIE_DURATION,
        post_demo_log_in, post_log_in,
    };

    const PASSWORD: &str = "correct horse battery staple";

    async fn mock_log_in(Json(body): Json<Value>) -> Result<Json<Value>, (StatusCode, String)> {
        match (body["email"].as_str(), body["password"].as_str()) {
            (Some("ana@example.com"), Some(PASSWORD)) => Ok(Json(json!({"token": "ana-token"}))),
            (Some(DEMO_EMAIL), Some(_)) => Ok(Json(json!({"token": "demo-token"}))),
            (Some("locked@example.com"), _) => Err((
                StatusCode::TOO_MANY_REQUESTS,
                "Account locked for 15 minutes.".to_owned(),
            )),
            _ => Err((StatusCode::UNAUTHORIZED, String::new())),
        }
    }

    async fn mock_current_user(headers: HeaderMap) -> Json<Value> {
        let email = match headers.get("authorization").and_then(|value| value.to_str().ok()) {
            Some("Bearer demo-token") => DEMO_EMAIL,
            _ => "ana@example.com",
        };

        Json(json!({"email": email, "name": "Ana", "planType": "FREE"}))
    }

    async fn get_test_state() -> LoginState {
        let api = spawn_mock_api(
            Router::new()
                .route("/auth/login", post(mock_log_in))
                .route("/api/users/me", get(mock_current_user)),
        )
        .await;

        LoginState {
            cookie_key: Key::from(&Sha512::digest("foobar")),
            cookie_duration: DEFAULT_COOKIE_DURATION,
            api,
        }
    }

    async fn new_log_in_request(state: LoginState, log_in_form: LogInData) -> Response<Body> {
        let jar = PrivateCookieJar::new(state.cookie_key.clone());

        post_log_in(State(state), jar, Form(log_in_form)).await
    }

    fn log_in_data(email: &str, password: &str) -> LogInData {
        LogInData {
            email: email.to_owned(),
            password: password.to_owned(),
            remember_me: None,
            redirect_url: None,
        }
    }

    #[track_caller]
    fn assert_date_time_close(left: OffsetDateTime, right: OffsetDateTime) {
        assert!(
            (left - right).abs() < Duration::seconds(2),
            "got date time {left:?}, want {right:?}"
        );
    }

    async fn assert_body_contains_message(response: Response<Body>, message: &str) {
        let fragment = parse_html_fragment(response).await;
        let error_selector = scraper::Selector::parse("p.text-red-500.text-base").unwrap();
        let error = fragment
            .select(&error_selector)
            .next()
            .expect("expected error message paragraph");
        let error_text = error.text().collect::<String>();
        assert_eq!(
            error_text.trim(),
            message,
            "response body should include error message \"{message}\", got \"{error_text}\""
        );
    }

    #[tokio::test]
    async fn log_in_succeeds_with_valid_credentials() {
        let state = get_test_state().await;
        let key = state.cookie_key.clone();

        let response = new_log_in_request(state, log_in_data("ana@example.com", PASSWORD)).await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_hx_redirect(&response, endpoints::DASHBOARD_VIEW);

        let jar = PrivateCookieJar::from_headers(&cookie_headers(&response), key);
        let session = get_session_from_cookies(&jar).expect("Could not read session cookie");
        assert_eq!(session.api_token, "ana-token");
        assert_eq!(session.email, "ana@example.com");
        assert_eq!(session.name.as_deref(), Some("Ana"));
    }

    #[tokio::test]
    async fn log_in_redirects_to_requested_url() {
        let state = get_test_state().await;
        let redirect_url = "/budgets?month=10&year=2025";

        let response = new_log_in_request(
            state,
            LogInData {
                redirect_url: Some(redirect_url.to_owned()),
                ..log_in_data("ana@example.com", PASSWORD)
            },
        )
        .await;

        assert_hx_redirect(&response, redirect_url);
    }

    #[tokio::test]
    async fn log_in_falls_back_on_invalid_redirect_url() {
        let state = get_test_state().await;

        let response = new_log_in_request(
            state,
            LogInData {
                redirect_url: Some("https://example.com".to_owned()),
                ..log_in_data("ana@example.com", PASSWORD)
            },
        )
        .await;

        assert_hx_redirect(&response, endpoints::DASHBOARD_VIEW);
    }

    #[tokio::test]
    async fn log_in_fails_with_incorrect_password() {
        let state = get_test_state().await;

        let response =
            new_log_in_request(state, log_in_data("ana@example.com", "wrongpassword")).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_body_contains_message(response, INVALID_CREDENTIALS_ERROR_MSG).await;
    }

    #[tokio::test]
    async fn log_in_shows_lock_out_message() {
        let state = get_test_state().await;

        let response =
            new_log_in_request(state, log_in_data("locked@example.com", "anything")).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_body_contains_message(response, "Account locked for 15 minutes.").await;
    }

    #[tokio::test]
    async fn log_in_shows_connection_error() {
        let state = LoginState {
            api: ApiClient::new("http://127.0.0.1:1/api"),
            ..get_test_state().await
        };

        let response = new_log_in_request(state, log_in_data("ana@example.com", PASSWORD)).await;

        assert_body_contains_message(
            response,
            "Connection error. Check that the server is running.",
        )
        .await;
    }

    #[tokio::test]
    async fn remember_me_extends_session_cookie_through_form() {
        let state = get_test_state().await;
        let app = Router::new()
            .route(endpoints::LOG_IN_API, post(post_log_in))
            .with_state(state);
        let server = TestServer::new(app).expect("Could not create test server.");
        let form = [
            ("email", "ana@example.com"),
            ("password", PASSWORD),
            ("remember_me", "on"),
        ];

        let response = server.post(endpoints::LOG_IN_API).form(&form).await;

        assert_eq!(response.status_code(), StatusCode::SEE_OTHER);
        let token_cookie = response.cookie(COOKIE_TOKEN);
        assert_date_time_close(
            token_cookie.expires_datetime().unwrap(),
            OffsetDateTime::now_utc() + REMEMBER_ME_COOKIE_DURATION,
        );
    }

    #[tokio::test]
    async fn log_in_fails_with_missing_credentials() {
        let state = get_test_state().await;
        let app = Router::new()
            .route(endpoints::LOG_IN_API, post(post_log_in))
            .with_state(state);
        let server = TestServer::new(app).expect("Could not create test server.");

        server
            .post(endpoints::LOG_IN_API)
            .content_type("application/x-www-form-urlencoded")
            .await
            .assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn demo_log_in_starts_demo_session() {
        let state = get_test_state().await;
        let key = state.cookie_key.clone();
        let jar = PrivateCookieJar::new(key.clone());

        let response = post_demo_log_in(State(state), jar).await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_hx_redirect(&response, endpoints::DASHBOARD_VIEW);
        let jar = PrivateCookieJar::from_headers(&cookie_headers(&response), key);
        let session = get_session_from_cookies(&jar).expect("Could not read session cookie");
        assert!(session.is_demo());
    }

    /// Turn the Set-Cookie headers of a response into Cookie request headers.
    fn cookie_headers(response: &Response<Body>) -> HeaderMap {
        let mut headers = HeaderMap::new();

        for set_cookie in response.headers().get_all("set-cookie") {
            let cookie = set_cookie
                .to_str()
                .unwrap()
                .split(';')
                .next()
                .unwrap()
                .to_owned();
            headers.append("cookie", cookie.parse().unwrap());
        }

        headers
    }
}
