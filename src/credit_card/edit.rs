//! Credit card editing page and endpoint.

use axum::{
    Extension, Form,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;

use crate::{
    Error,
    app_state::ApiState,
    auth::{Session, ensure_not_demo},
    credit_card::{
        CreditCardForm, NewCreditCard,
        form::{CreditCardFormValues, credit_card_form_view},
        get_credit_cards, update_credit_card,
    },
    endpoints,
    html::{FormMethod, form_page},
};

/// Render the page for editing the credit card with `card_id`.
pub async fn get_edit_credit_card_page(
    Path(card_id): Path<i64>,
    State(state): State<ApiState>,
    Extension(session): Extension<Session>,
) -> Result<Response, Error> {
    let card = get_credit_cards(&state.api, &session.api_token)
        .await
        .inspect_err(|error| tracing::error!("Could not get credit cards: {error}"))?
        .into_iter()
        .find(|card| card.id == card_id)
        .ok_or(Error::NotFound)?;

    let endpoint = endpoints::format_endpoint(endpoints::CREDIT_CARD, card_id);
    let values = CreditCardFormValues {
        name: &card.name,
        last_four_digits: card.last_four_digits.as_deref().unwrap_or_default(),
        limit_total: Some(card.limit_total),
        closing_day: Some(card.closing_day),
        due_day: Some(card.due_day),
        color: card.color(),
    };
    let form = credit_card_form_view(
        &endpoint,
        FormMethod::Put,
        &values,
        "",
        session.is_demo(),
    );

    Ok(form_page("Edit Credit Card", endpoints::WALLET_VIEW, &form).into_response())
}

/// Handle credit card edit form submission.
pub async fn update_credit_card_endpoint(
    Path(card_id): Path<i64>,
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
            let endpoint = endpoints::format_endpoint(endpoints::CREDIT_CARD, card_id);

            return credit_card_form_view(
                &endpoint,
                FormMethod::Put,
                &CreditCardFormValues::from(&form),
                &format!("Error: {error}"),
                false,
            )
            .into_response();
        }
    };

    match update_credit_card(&state.api, &session.api_token, card_id, &card).await {
        Ok(()) => (
            HxRedirect(endpoints::WALLET_VIEW.to_owned()),
            StatusCode::SEE_OTHER,
        )
            .into_response(),
        Err(error) => {
            tracing::error!(
                "An unexpected error occurred while updating credit card {card_id}: {error}"
            );
            error.into_alert_response()
        }
    }
}

#[cfg(test)]
mod edit_credit_card_tests {
    use axum::{
        Extension, Form, Json, Router,
        extract::{Path, State},
        http::StatusCode,
        routing::get,
    };
    use serde_json::json;

    use crate::{
        credit_card::{CreditCardForm, get_edit_credit_card_page, update_credit_card_endpoint},
        endpoints,
        test_utils::{
            api_state, assert_form_error_message, assert_form_input_with_value,
            assert_hx_endpoint, must_get_form, parse_html_document, parse_html_fragment,
            record_json_body, recorded_bodies, spawn_mock_api, test_session,
        },
    };

    #[tokio::test]
    async fn render_page() {
        let api = spawn_mock_api(Router::new().route(
            "/api/credit-cards",
            get(|| async {
                Json(json!([{
                    "id": 6, "name": "Black", "lastFourDigits": "0001",
                    "limitTotal": 10000.0, "limitUsed": 1200.0,
                    "closingDay": 20, "dueDay": 27, "color": "#111111",
                }]))
            }),
        ))
        .await;

        let response =
            get_edit_credit_card_page(Path(6), State(api_state(api)), Extension(test_session()))
                .await
                .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = parse_html_document(response).await;
        let form = must_get_form(&html);
        assert_hx_endpoint(
            &form,
            &endpoints::format_endpoint(endpoints::CREDIT_CARD, 6),
            "hx-put",
        );
        assert_form_input_with_value(&form, "last_four_digits", "text", "0001");
        assert_form_input_with_value(&form, "closing_day", "number", "20");
        assert_form_input_with_value(&form, "due_day", "number", "27");
    }

    fn form(closing_day: u8) -> CreditCardForm {
        CreditCardForm {
            name: "Black".to_owned(),
            last_four_digits: "0001".to_owned(),
            limit_total: 12000.0,
            closing_day,
            due_day: 27,
            color: "#111111".to_owned(),
        }
    }

    #[tokio::test]
    async fn can_update_credit_card() {
        let bodies = recorded_bodies();
        let api = spawn_mock_api(
            Router::new().route("/api/credit-cards/6", record_json_body(&bodies)),
        )
        .await;

        let response = update_credit_card_endpoint(
            Path(6),
            State(api_state(api)),
            Extension(test_session()),
            Form(form(20)),
        )
        .await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(bodies.lock().unwrap()[0]["limitTotal"], json!(12000.0));
    }

    #[tokio::test]
    async fn update_fails_on_invalid_day() {
        let bodies = recorded_bodies();
        let api = spawn_mock_api(
            Router::new().route("/api/credit-cards/6", record_json_body(&bodies)),
        )
        .await;

        let response = update_credit_card_endpoint(
            Path(6),
            State(api_state(api)),
            Extension(test_session()),
            Form(form(0)),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let html = parse_html_fragment(response).await;
        let form = must_get_form(&html);
        assert_form_error_message(
            &form,
            "Error: 0 is not a valid day of the month, use a day between 1 and 31",
        );
        assert!(bodies.lock().unwrap().is_empty());
    }
}
