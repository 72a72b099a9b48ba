//! Account creation page and endpoint.

use axum::{
    Extension, Form,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;

use crate::{
    account::{
        AccountForm, NewAccount, create_account,
        form::{AccountFormView, account_form_view},
    },
    app_state::ApiState,
    auth::{Session, ensure_not_demo},
    endpoints,
    html::{FormMethod, form_page},
};

/// Render the page for adding a bank account.
pub async fn get_new_account_page(Extension(session): Extension<Session>) -> Response {
    let form = account_form_view(AccountFormView {
        endpoint: endpoints::ACCOUNTS_API,
        method: FormMethod::Post,
        name: "",
        bank: "",
        initial_balance: None,
        error_message: "",
        is_demo: session.is_demo(),
    });

    form_page("Add Account", endpoints::WALLET_VIEW, &form).into_response()
}

/// Handle account creation form submission.
pub async fn create_account_endpoint(
    State(state): State<ApiState>,
    Extension(session): Extension<Session>,
    Form(form): Form<AccountForm>,
) -> Response {
    if let Err(error) = ensure_not_demo(&session) {
        return error.into_alert_response();
    }

    let account = match NewAccount::from_form(&form) {
        Ok(account) => account,
        Err(error) => {
            return account_form_view(AccountFormView {
                endpoint: endpoints::ACCOUNTS_API,
                method: FormMethod::Post,
                name: &form.name,
                bank: &form.bank,
                initial_balance: Some(form.initial_balance),
                error_message: &format!("Error: {error}"),
                is_demo: false,
            })
            .into_response();
        }
    };

    match create_account(&state.api, &session.api_token, &account).await {
        Ok(()) => (
            HxRedirect(endpoints::WALLET_VIEW.to_owned()),
            StatusCode::SEE_OTHER,
        )
            .into_response(),
        Err(error) => {
            tracing::error!("An unexpected error occurred while creating an account: {error}");
            error.into_alert_response()
        }
    }
}


#[cfg(test)]
mod create_account_endpoint_tests {
    use axum::{Extension, Form, Router, extract::State, http::StatusCode};
    use serde_json::json;

    use crate::{
        account::{AccountForm, create_account_endpoint},
        endpoints,
        test_utils::{
            api_state, assert_form_error_message, assert_hx_redirect, demo_session,
            must_get_form, parse_html_fragment, record_json_body, recorded_bodies,
            spawn_mock_api, test_session,
        },
    };

    fn form(name: &str) -> AccountForm {
        AccountForm {
            name: name.to_owned(),
            bank: "Inter".to_owned(),
            initial_balance: 250.5,
        }
    }

    #[tokio::test]
    async fn can_create_account() {
        let bodies = recorded_bodies();
        let api =
            spawn_mock_api(Router::new().route("/api/accounts", record_json_body(&bodies))).await;

        let response = create_account_endpoint(
            State(api_state(api)),
            Extension(test_session()),
            Form(form("Main")),
        )
        .await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_hx_redirect(&response, endpoints::WALLET_VIEW);
        assert_eq!(
            *bodies.lock().unwrap(),
            vec![json!({
                "name": "Main",
                "bank": "Inter",
                "initialBalance": 250.5,
                "type": "CHECKING",
            })]
        );
    }

    #[tokio::test]
    async fn create_account_fails_on_empty_name() {
        let bodies = recorded_bodies();
        let api =
            spawn_mock_api(Router::new().route("/api/accounts", record_json_body(&bodies))).await;

        let response = create_account_endpoint(
            State(api_state(api)),
            Extension(test_session()),
            Form(form("")),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let html = parse_html_fragment(response).await;
        let form = must_get_form(&html);
        assert_form_error_message(&form, "Error: Account name cannot be empty");
        assert!(bodies.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn demo_session_cannot_create_account() {
        let bodies = recorded_bodies();
        let api =
            spawn_mock_api(Router::new().route("/api/accounts", record_json_body(&bodies))).await;

        let response = create_account_endpoint(
            State(api_state(api)),
            Extension(demo_session()),
            Form(form("Main")),
        )
        .await;

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert!(bodies.lock().unwrap().is_empty());
    }
}
