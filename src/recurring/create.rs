//! Recurring transaction creation page and endpoint.

use axum::{
    Extension, Form,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;

use crate::{
    Error,
    app_state::ApiState,
    auth::{Session, ensure_not_demo},
    category::get_categories,
    endpoints,
    html::{FormMethod, form_page},
    recurring::{
        NewRecurring, RecurringForm, create_recurring,
        form::{RecurringFormView, recurring_form_view},
    },
    transaction_type::TransactionType,
};

/// Render the page for adding a recurring transaction.
pub async fn get_new_recurring_page(
    State(state): State<ApiState>,
    Extension(session): Extension<Session>,
) -> Result<Response, Error> {
    let categories = get_categories(&state.api, &session.api_token)
        .await
        .inspect_err(|error| tracing::error!("Could not get categories: {error}"))?;

    let form = recurring_form_view(RecurringFormView {
        endpoint: endpoints::RECURRING_API,
        method: FormMethod::Post,
        transaction_type: TransactionType::Expense,
        description: "",
        amount: None,
        due_day: None,
        category_id: None,
        categories: &categories,
        error_message: "",
        is_demo: session.is_demo(),
    });

    Ok(form_page("Add Recurring Transaction", endpoints::RECURRING_VIEW, &form).into_response())
}

/// Handle recurring transaction creation form submission.
pub async fn create_recurring_endpoint(
    State(state): State<ApiState>,
    Extension(session): Extension<Session>,
    Form(form): Form<RecurringForm>,
) -> Response {
    if let Err(error) = ensure_not_demo(&session) {
        return error.into_alert_response();
    }

    let categories = match get_categories(&state.api, &session.api_token).await {
        Ok(categories) => categories,
        Err(error) => {
            tracing::error!("Could not get categories: {error}");
            return error.into_alert_response();
        }
    };

    let recurring = match NewRecurring::from_form(&form, &categories) {
        Ok(recurring) => recurring,
        Err(error) => {
            return recurring_form_view(RecurringFormView {
                endpoint: endpoints::RECURRING_API,
                method: FormMethod::Post,
                transaction_type: form.transaction_type,
                description: &form.description,
                amount: Some(form.amount),
                due_day: Some(form.due_day),
                category_id: form.category_id,
                categories: &categories,
                error_message: &format!("Error: {error}"),
                is_demo: false,
            })
            .into_response();
        }
    };

    match create_recurring(&state.api, &session.api_token, &recurring).await {
        Ok(()) => (
            HxRedirect(endpoints::RECURRING_VIEW.to_owned()),
            StatusCode::SEE_OTHER,
        )
            .into_response(),
        Err(error) => {
            tracing::error!(
                "An unexpected error occurred while creating a recurring transaction: {error}"
            );
            error.into_alert_response()
        }
    }
}

#[cfg(test)]
mod create_recurring_tests {
    use axum::{Extension, Form, extract::State, http::StatusCode};
    use serde_json::json;

    use crate::{
        endpoints,
        recurring::{
            RecurringForm, create_recurring_endpoint, form::categories_route,
            get_new_recurring_page,
        },
        test_utils::{
            api_state, assert_form_error_message, assert_form_input, assert_hx_endpoint,
            assert_hx_redirect, assert_valid_html, demo_session, must_get_form,
            parse_html_document, parse_html_fragment, record_json_body, recorded_bodies,
            spawn_mock_api, test_session,
        },
        transaction_type::TransactionType,
    };

    fn form(due_day: u8) -> RecurringForm {
        RecurringForm {
            transaction_type: TransactionType::Expense,
            description: "Rent".to_owned(),
            amount: 1800.0,
            due_day,
            category_id: Some(2),
        }
    }

    #[tokio::test]
    async fn render_page() {
        let api = spawn_mock_api(categories_route()).await;

        let response = get_new_recurring_page(State(api_state(api)), Extension(test_session()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = parse_html_document(response).await;
        assert_valid_html(&html);
        let form = must_get_form(&html);
        assert_hx_endpoint(&form, endpoints::RECURRING_API, "hx-post");
        assert_form_input(&form, "description", "text");
        assert_form_input(&form, "amount", "number");
        assert_form_input(&form, "due_day", "number");
    }

    #[tokio::test]
    async fn can_create_recurring_transaction() {
        let bodies = recorded_bodies();
        let api = spawn_mock_api(
            categories_route().route("/api/recurring", record_json_body(&bodies)),
        )
        .await;

        let response = create_recurring_endpoint(
            State(api_state(api)),
            Extension(test_session()),
            Form(form(10)),
        )
        .await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_hx_redirect(&response, endpoints::RECURRING_VIEW);
        assert_eq!(
            *bodies.lock().unwrap(),
            vec![json!({
                "description": "Rent",
                "amount": 1800.0,
                "type": "EXPENSE",
                "category": { "id": 2 },
                "dueDay": 10,
                "frequency": "MONTHLY",
            })]
        );
    }

    #[tokio::test]
    async fn invalid_due_day_shows_error() {
        let bodies = recorded_bodies();
        let api = spawn_mock_api(
            categories_route().route("/api/recurring", record_json_body(&bodies)),
        )
        .await;

        let response = create_recurring_endpoint(
            State(api_state(api)),
            Extension(test_session()),
            Form(form(32)),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let html = parse_html_fragment(response).await;
        assert_form_error_message(
            &must_get_form(&html),
            "Error: 32 is not a valid day of the month, use a day between 1 and 31",
        );
        assert!(bodies.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn demo_session_cannot_create_recurring_transaction() {
        let bodies = recorded_bodies();
        let api = spawn_mock_api(
            categories_route().route("/api/recurring", record_json_body(&bodies)),
        )
        .await;

        let response = create_recurring_endpoint(
            State(api_state(api)),
            Extension(demo_session()),
            Form(form(10)),
        )
        .await;

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert!(bodies.lock().unwrap().is_empty());
    }
}
