//! The registration page for creating a new account with the API.

use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;
use maud::{Markup, html};
use serde::{Deserialize, Serialize};
use zxcvbn::{Score, feedback::Feedback, zxcvbn};

use crate::{
    Error,
    api_client::{ApiClient, ApiError},
    auth::log_in::{CONNECTION_ERROR_MSG, email_input},
    cpf::{clean_cpf, format_cpf, is_valid_cpf},
    endpoints,
    html::{
        FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, base, loading_spinner, log_in_register,
        password_input,
    },
};

/// The minimum number of characters the password should have to be considered valid on the
/// client side (the strength check is done on the server on top of this).
const PASSWORD_INPUT_MIN_LENGTH: u8 = 8;

/// The validation messages to show next to the fields of the registration form.
#[derive(Debug, Default)]
struct FormErrors<'a> {
    cpf: Option<&'a str>,
    password: Option<&'a str>,
    form: Option<&'a str>,
}

fn cpf_input(cpf: &str, error_message: Option<&str>) -> Markup {
    html! {
        div
        {
            label for="cpf" class=(FORM_LABEL_STYLE) { "CPF" }

            input
                type="text"
                name="cpf"
                id="cpf"
                inputmode="numeric"
                placeholder="000.000.000-00"
                maxlength="14"
                class=(FORM_TEXT_INPUT_STYLE)
                required
                value=(format_cpf(cpf));

            @if let Some(error_message) = error_message
            {
                p class="text-red-500 text-base" { (error_message) }
            }
        }
    }
}

fn registration_form(form: &RegisterForm, errors: FormErrors) -> Markup {
    html! {
        form
            hx-post=(endpoints::USERS)
            hx-indicator="#indicator"
            hx-disabled-elt="#submit-button"
            class="space-y-4 md:space-y-6"
        {
            div
            {
                label for="name" class=(FORM_LABEL_STYLE) { "Name" }

                input
                    type="text"
                    name="name"
                    id="name"
                    placeholder="Your name"
                    autocomplete="name"
                    class=(FORM_TEXT_INPUT_STYLE)
                    required
                    value=(form.name);
            }

            (email_input(&form.email))

            (cpf_input(&form.cpf, errors.cpf))

            (password_input(&form.password, PASSWORD_INPUT_MIN_LENGTH, errors.password))

            @if let Some(error_message) = errors.form
            {
                p class="text-red-500 text-base" id="form-error" { (error_message) }
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
                "Create account"
            }

            p class="text-sm font-light text-gray-500 dark:text-gray-400"
            {
                "Already have an account? "

                a
                    href=(endpoints::LOG_IN_VIEW) tabindex="0"
                    class="font-semibold leading-6 text-blue-600 hover:text-blue-500 dark:text-blue-500 dark:hover:text-blue-400"
                {
                  "Log in here"
                }
            }
        }
    }
}

/// Display the registration page.
pub async fn get_register_page() -> Response {
    let registration_form = registration_form(&RegisterForm::default(), FormErrors::default());
    let content = log_in_register("Create an account", &registration_form);
    base("Register", &[], &content).into_response()
}

/// The raw data entered by the user in the registration form.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub cpf: String,
}

#[derive(Serialize)]
struct RegisterRequest<'a> {
    name: &'a str,
    email: &'a str,
    password: &'a str,
    cpf: &'a str,
}

/// Check that the password is hard to guess, using the name and email as context.
fn check_password_strength(password: &str, name: &str, email: &str) -> Result<(), Error> {
    let password_analysis = zxcvbn(password, &[name, email]);

    match password_analysis.score() {
        Score::Three | Score::Four => Ok(()),
        _ => Err(Error::TooWeak(
            password_analysis
                .feedback()
                .unwrap_or(&Feedback::default())
                .to_string(),
        )),
    }
}

/// The message to show the user when the API rejects a registration.
fn registration_error_message(error: ApiError) -> String {
    match error {
        ApiError::Conflict(message) => {
            message.unwrap_or_else(|| "CPF or email already registered.".to_owned())
        }
        ApiError::BadRequest(message) => {
            message.unwrap_or_else(|| "Invalid data. Check the CPF.".to_owned())
        }
        ApiError::TooManyRequests(message) => message,
        ApiError::Status(status, message) => format!("Error {status}: {message}"),
        ApiError::Unauthorized => "Error 401: Server failure".to_owned(),
        ApiError::NotFound => "Error 404: Server failure".to_owned(),
        ApiError::Transport(_) => CONNECTION_ERROR_MSG.to_owned(),
        ApiError::Decode(error) => {
            tracing::error!("Could not decode registration response: {error}");
            "Server failure".to_owned()
        }
    }
}

/// Validate the registration form and create the account with the API.
///
/// Redirects to the log-in page on success, otherwise the form is returned with the problem.
pub async fn register_user(State(api): State<ApiClient>, Form(form): Form<RegisterForm>) -> Response {
    let name = form.name.trim();
    let email = form.email.trim();

    if name.is_empty() {
        let message = format!("Error: {}", Error::EmptyField("Name"));
        return registration_form(
            &form,
            FormErrors {
                form: Some(&message),
                ..Default::default()
            },
        )
        .into_response();
    }

    let cpf = clean_cpf(&form.cpf);
    if !is_valid_cpf(&cpf) {
        let message = Error::InvalidCpf.to_string();
        return registration_form(
            &form,
            FormErrors {
                cpf: Some(&message),
                ..Default::default()
            },
        )
        .into_response();
    }

    if let Err(error) = check_password_strength(&form.password, name, email) {
        let message = error.to_string();
        return registration_form(
            &form,
            FormErrors {
                password: Some(&message),
                ..Default::default()
            },
        )
        .into_response();
    }

    let request = RegisterRequest {
        name,
        email,
        password: &form.password,
        cpf: &cpf,
    };

    match api.register(&request).await {
        Ok(()) => {
            tracing::info!("Registered a new account for {email}");
            (
                HxRedirect(endpoints::LOG_IN_VIEW.to_owned()),
                StatusCode::SEE_OTHER,
            )
                .into_response()
        }
        Err(error) => {
            tracing::warn!("Registration rejected for {email}: {error}");
            let message = registration_error_message(error);
            registration_form(
                &form,
                FormErrors {
                    form: Some(&message),
                    ..Default::default()
                },
            )
            .into_response()
        }
    }
}


#[cfg(test)]
mod register_user_tests {
    use axum::{
        Form, Json, Router,
        body::Body,
        extract::State,
        http::{Response, StatusCode},
        routing::post,
    };
    use serde_json::Value;

    use crate::{
        api_client::ApiClient,
        endpoints,
        test_utils::{assert_hx_redirect, parse_html_fragment, spawn_mock_api},
    };

    use super::{RegisterForm, register_user};

    const STRONG_PASSWORD: &str = "correct horse battery staple";

    async fn mock_register(Json(body): Json<Value>) -> (StatusCode, String) {
        match body["email"].as_str() {
            Some("taken@example.com") => (StatusCode::CONFLICT, String::new()),
            Some("rejected@example.com") => (
                StatusCode::BAD_REQUEST,
                r#"{"message":"CPF already registered"}"#.to_owned(),
            ),
            Some("broken@example.com") => (StatusCode::INTERNAL_SERVER_ERROR, String::new()),
            _ if body["cpf"] == "52998224725" => (StatusCode::CREATED, String::new()),
            _ => (StatusCode::BAD_REQUEST, String::new()),
        }
    }

    async fn get_test_api() -> ApiClient {
        spawn_mock_api(Router::new().route("/auth/register", post(mock_register))).await
    }

    fn form(email: &str) -> RegisterForm {
        RegisterForm {
            name: "Ana Souza".to_owned(),
            email: email.to_owned(),
            password: STRONG_PASSWORD.to_owned(),
            cpf: "529.982.247-25".to_owned(),
        }
    }

    async fn get_error_message(response: Response<Body>) -> String {
        let html = parse_html_fragment(response).await;
        html.select(&scraper::Selector::parse("p.text-red-500").unwrap())
            .next()
            .expect("No error message found")
            .text()
            .collect::<String>()
            .trim()
            .to_owned()
    }

    #[tokio::test]
    async fn registration_redirects_to_log_in() {
        let api = get_test_api().await;

        let response = register_user(State(api), Form(form("ana@example.com"))).await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_hx_redirect(&response, endpoints::LOG_IN_VIEW);
    }

    #[tokio::test]
    async fn invalid_cpf_is_rejected_before_calling_api() {
        let api = ApiClient::new("http://127.0.0.1:1/api");
        let form = RegisterForm {
            cpf: "111.111.111-11".to_owned(),
            ..form("ana@example.com")
        };

        let response = register_user(State(api), Form(form)).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            get_error_message(response).await,
            "Invalid CPF. Check the digits and try again."
        );
    }

    #[tokio::test]
    async fn weak_password_is_rejected() {
        let api = ApiClient::new("http://127.0.0.1:1/api");
        let form = RegisterForm {
            password: "password".to_owned(),
            ..form("ana@example.com")
        };

        let response = register_user(State(api), Form(form)).await;

        assert!(get_error_message(response).await.starts_with("password is too weak"));
    }

    #[tokio::test]
    async fn empty_name_is_rejected() {
        let api = ApiClient::new("http://127.0.0.1:1/api");
        let form = RegisterForm {
            name: "  ".to_owned(),
            ..form("ana@example.com")
        };

        let response = register_user(State(api), Form(form)).await;

        assert_eq!(get_error_message(response).await, "Error: Name cannot be empty");
    }

    #[tokio::test]
    async fn conflict_uses_default_message() {
        let api = get_test_api().await;

        let response = register_user(State(api), Form(form("taken@example.com"))).await;

        assert_eq!(
            get_error_message(response).await,
            "CPF or email already registered."
        );
    }

    #[tokio::test]
    async fn bad_request_uses_api_message() {
        let api = get_test_api().await;

        let response = register_user(State(api), Form(form("rejected@example.com"))).await;

        assert_eq!(get_error_message(response).await, "CPF already registered");
    }

    #[tokio::test]
    async fn server_error_shows_status() {
        let api = get_test_api().await;

        let response = register_user(State(api), Form(form("broken@example.com"))).await;

        assert_eq!(get_error_message(response).await, "Error 500: Server failure");
    }

    #[tokio::test]
    async fn unreachable_api_shows_connection_error() {
        let api = ApiClient::new("http://127.0.0.1:1/api");

        let response = register_user(State(api), Form(form("ana@example.com"))).await;

        assert_eq!(
            get_error_message(response).await,
            "Connection error. Check that the server is running."
        );
    }
}
