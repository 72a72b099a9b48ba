//! Credit card creation page and endpoint.

use axum::{
    Extension, Form,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;

use crate::{
    app_state::ApiState,
    auth::{Session, ensure_not_demo},
    credit_card::{
        CreditCardForm, NewCreditCard, create_credit_card,
        form::{CreditCardFormValues, credit_card_form_view},
    },
    endpoints,
    html::{FormMethod, form_page},
};

/// Render the page for adding a credit card.
pub async fn get_new_credit_card_page(Extension(session): Extension<Session>) -> Response {
    let form = credit_card_form_view(
        endpoints::CREDIT_CARDS_API,
        FormMethod::Post,
        &CreditCardFormValues::default(),
        "",
        session.is_demo(),
    );

    form_page("Add Credit Card", endpoints::WALLET_VIEW, &form).into_response()
}

/// Handle credit card creation form submission.
pub async fn create_credit_card_endpoint(
    State(state): State<ApiState>,
    Extension(session): Extension<Session>,
    Form(form): Form<CreditCardForm>,
) -> Response {
    if let Err(error) = ensure_not_demo(&session) {
        return error.into_alert_response();
    }

    let card = match NewCreditCard::from_form(&form) {
        Ok(card) => card,
        Err(error) => {
            return credit_card_form_view(
                endpoints::CREDIT_CARDS_API,
                FormMethod::Post,
                &CreditCardFormValues::from(&form),
                &format!("Error: {error}"),
                false,
            )
            .into_response();
        }
    };

    match create_credit_card(&state.api, &session.api_token, &card).await {
        Ok(()) => (
            HxRedirect(endpoints::WALLET_VIEW.to_owned()),
            StatusCode::SEE_OTHER,
        )
            .into_response(),
        Err(error) => {
            tracing::error!("An unexpected error occurred while creating a credit card: {error}");
            error.into_alert_response()
        }
    }
}

impl<'a> From<&'a CreditCardForm> for CreditCardFormValues<'a> {
    fn from(form: &'a CreditCardForm) -> Self {
        Self {
            name: &form.name,
            last_four_digits: &form.last_four_digits,
            limit_total: Some(form.limit_total),
            closing_day: Some(form.closing_day),
            due_day: Some(form.due_day),
            color: &form.color,
        }
    }
}

#[cfg(test)]
mod new_credit_card_page_tests {
    use axum::{Extension, http::StatusCode};

    use crate::{
        credit_card::get_new_credit_card_page,
        endpoints,
        test_utils::{
            assert_form_input, assert_form_submit_button, assert_hx_endpoint, assert_valid_html,
            must_get_form, parse_html_document, test_session,
        },
    };

    #[tokio::test]
    async fn render_page() {
        let response = get_new_credit_card_page(Extension(test_session())).await;

        assert_eq!(response.status(), StatusCode::OK);
        let html = parse_html_document(response).await;
        assert_valid_html(&html);

        let form = must_get_form(&html);
        assert_hx_endpoint(&form, endpoints::CREDIT_CARDS_API, "hx-post");
        assert_form_input(&form, "name", "text");
        assert_form_input(&form, "last_four_digits", "text");
        assert_form_input(&form, "limit_total", "number");
        assert_form_input(&form, "closing_day", "number");
        assert_form_input(&form, "due_day", "number");
        assert_form_submit_button(&form);
        let color = scraper::Selector::parse("input[name=color]").unwrap();
        let color = form.select(&color).next().expect("No colour input");
        assert_eq!(color.value().attr("value"), Some("#3b82f6"));
    }
}
