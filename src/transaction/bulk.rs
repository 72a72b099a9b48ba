//! Endpoints that act on several selected transactions at once.

use axum::{
    Extension,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::Form;
use axum_htmx::HxRedirect;
use futures::future::try_join_all;
use serde::Deserialize;
use time::Date;

use crate::{
    Error,
    app_state::ApiState,
    auth::{Session, ensure_not_demo},
    category::get_categories,
    endpoints,
    form_fields::empty_as_none,
    month::{MonthQuery, MonthYear},
    timezone::current_local_date,
    transaction::{NewTransaction, delete_transaction, get_transactions, update_transaction},
};

/// The selected transaction IDs and the month the selection was made in.
///
/// Each checkbox submits its own `ids` field.
#[derive(Debug, Clone, Deserialize)]
pub struct BulkDeleteForm {
    #[serde(default)]
    pub ids: Vec<i64>,
    pub month: u8,
    pub year: i32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BulkCategorizeForm {
    #[serde(default)]
    pub ids: Vec<i64>,
    /// The new category. The blank placeholder option sends an empty value, which is rejected.
    #[serde(default, deserialize_with = "empty_as_none")]
    pub category_id: Option<i64>,
    pub month: u8,
    pub year: i32,
}

fn transactions_page_url(month: MonthYear) -> String {
    format!("{}?{}", endpoints::TRANSACTIONS_VIEW, month.to_query_string())
}

fn selected_month(month: u8, year: i32, today: Date) -> MonthYear {
    let query = MonthQuery {
        month: Some(month),
        year: Some(year),
    };

    MonthYear::from_query(&query, today)
}

/// Delete every selected transaction and reload the month.
pub async fn bulk_delete_transactions_endpoint(
    State(state): State<ApiState>,
    Extension(session): Extension<Session>,
    Form(form): Form<BulkDeleteForm>,
) -> Response {
    if let Err(error) = ensure_not_demo(&session) {
        return error.into_alert_response();
    }

    if form.ids.is_empty() {
        return Error::EmptySelection.into_alert_response();
    }

    let month = match current_local_date(&state.local_timezone) {
        Ok(today) => selected_month(form.month, form.year, today),
        Err(error) => return error.into_alert_response(),
    };

    let deletions = form
        .ids
        .iter()
        .map(|&id| delete_transaction(&state.api, &session.api_token, id));

    match try_join_all(deletions).await {
        Ok(_) => {
            tracing::info!("Deleted {} transactions", form.ids.len());
            (
                HxRedirect(transactions_page_url(month)),
                StatusCode::SEE_OTHER,
            )
                .into_response()
        }
        Err(error) => {
            tracing::error!("An unexpected error occurred while deleting transactions: {error}");
            error.into_alert_response()
        }
    }
}

/// Set the category of every selected transaction and reload the month.
///
/// The category is applied to every selected transaction, whatever its type.
/// Each transaction is re-sent with its own fields and no account or credit
/// card, so the API keeps its current source.
pub async fn bulk_categorize_transactions_endpoint(
    State(state): State<ApiState>,
    Extension(session): Extension<Session>,
    Form(form): Form<BulkCategorizeForm>,
) -> Response {
    if let Err(error) = ensure_not_demo(&session) {
        return error.into_alert_response();
    }

    if form.ids.is_empty() {
        return Error::EmptySelection.into_alert_response();
    }

    let Some(category_id) = form.category_id else {
        return Error::MissingCategory.into_alert_response();
    };

    let month = match current_local_date(&state.local_timezone) {
        Ok(today) => selected_month(form.month, form.year, today),
        Err(error) => return error.into_alert_response(),
    };

    match categorize(&state, &session, &form.ids, category_id, month).await {
        Ok(count) => {
            tracing::info!("Changed the category of {count} transactions");
            (
                HxRedirect(transactions_page_url(month)),
                StatusCode::SEE_OTHER,
            )
                .into_response()
        }
        Err(error) => {
            tracing::error!(
                "An unexpected error occurred while changing the category of transactions: {error}"
            );
            error.into_alert_response()
        }
    }
}

async fn categorize(
    state: &ApiState,
    session: &Session,
    ids: &[i64],
    category_id: i64,
    month: MonthYear,
) -> Result<usize, Error> {
    let token = &session.api_token;
    let (transactions, categories) = futures::try_join!(
        get_transactions(&state.api, token, month, None),
        get_categories(&state.api, token),
    )?;

    if !categories.iter().any(|category| category.id == category_id) {
        return Err(Error::NotFound);
    }

    let updates = ids
        .iter()
        .map(|id| -> Result<(i64, NewTransaction), Error> {
            let transaction = transactions
                .iter()
                .find(|transaction| transaction.id == *id)
                .ok_or(Error::NotFound)?;

            Ok((
                transaction.id,
                NewTransaction {
                    description: transaction.description.clone(),
                    amount: transaction.amount,
                    date: transaction.date,
                    transaction_type: transaction.transaction_type,
                    category_id: Some(category_id),
                    source: None,
                },
            ))
        })
        .collect::<Result<Vec<_>, _>>()?;

    try_join_all(
        updates
            .iter()
            .map(|(id, transaction)| update_transaction(&state.api, token, *id, transaction)),
    )
    .await?;

    Ok(updates.len())
}

#[cfg(test)]
mod bulk_delete_tests {
    use axum::{Extension, Router, extract::State, http::StatusCode};
    use axum_extra::extract::Form;

    use crate::{
        test_utils::{
            api_state, assert_hx_redirect, demo_session, record_request, recorded_bodies,
            spawn_mock_api, test_session,
        },
        transaction::{BulkDeleteForm, bulk_delete_transactions_endpoint},
    };

    #[test]
    fn form_collects_repeated_ids() {
        let form: BulkDeleteForm =
            serde_html_form::from_str("ids=1&ids=4&ids=9&month=3&year=2025").unwrap();

        assert_eq!(form.ids, vec![1, 4, 9]);
    }

    #[tokio::test]
    async fn deletes_every_selected_transaction() {
        let requests = recorded_bodies();
        let api = spawn_mock_api(
            Router::new().route("/api/transactions/{id}", record_request(&requests)),
        )
        .await;
        let form = BulkDeleteForm {
            ids: vec![1, 2, 3],
            month: 3,
            year: 2025,
        };

        let response = bulk_delete_transactions_endpoint(
            State(api_state(api)),
            Extension(test_session()),
            Form(form),
        )
        .await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_hx_redirect(&response, "/transactions?month=3&year=2025");
        assert_eq!(requests.lock().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn empty_selection_is_bad_request() {
        let requests = recorded_bodies();
        let api = spawn_mock_api(
            Router::new().route("/api/transactions/{id}", record_request(&requests)),
        )
        .await;
        let form = BulkDeleteForm {
            ids: vec![],
            month: 3,
            year: 2025,
        };

        let response = bulk_delete_transactions_endpoint(
            State(api_state(api)),
            Extension(test_session()),
            Form(form),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(requests.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn demo_session_cannot_bulk_delete() {
        let requests = recorded_bodies();
        let api = spawn_mock_api(
            Router::new().route("/api/transactions/{id}", record_request(&requests)),
        )
        .await;
        let form = BulkDeleteForm {
            ids: vec![1],
            month: 3,
            year: 2025,
        };

        let response = bulk_delete_transactions_endpoint(
            State(api_state(api)),
            Extension(demo_session()),
            Form(form),
        )
        .await;

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert!(requests.lock().unwrap().is_empty());
    }
}
