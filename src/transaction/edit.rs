//! Transaction editing page and endpoint.

use axum::{
    Extension, Form,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;

use crate::{
    Error,
    app_state::ApiState,
    auth::{Session, ensure_not_demo},
    endpoints,
    html::{FormMethod, form_page},
    month::{MonthQuery, MonthYear},
    timezone::current_local_date,
    transaction::{
        NewTransaction, TransactionForm,
        form::{FormOptions, TransactionFormView, transaction_form_view},
        get_transactions, update_transaction,
    },
};

/// The update endpoint for `transaction_id`, remembering the month the user came from.
fn update_endpoint(transaction_id: i64, month: MonthYear) -> String {
    format!(
        "{}?{}",
        endpoints::format_endpoint(endpoints::TRANSACTION, transaction_id),
        month.to_query_string()
    )
}

/// Render the page for editing the transaction with `transaction_id`.
///
/// The API only lists transactions by month, so the month in the query must
/// contain the transaction.
pub async fn get_edit_transaction_page(
    Path(transaction_id): Path<i64>,
    Query(query): Query<MonthQuery>,
    State(state): State<ApiState>,
    Extension(session): Extension<Session>,
) -> Result<Response, Error> {
    let today = current_local_date(&state.local_timezone)?;
    let month = MonthYear::from_query(&query, today);

    let (transactions, options) = futures::try_join!(
        get_transactions(&state.api, &session.api_token, month, None),
        FormOptions::fetch(&state.api, &session.api_token),
    )
    .inspect_err(|error| tracing::error!("Could not get transaction {transaction_id}: {error}"))?;

    let transaction = transactions
        .into_iter()
        .find(|transaction| transaction.id == transaction_id)
        .ok_or(Error::NotFound)?;

    let endpoint = update_endpoint(transaction_id, month);
    let form = transaction_form_view(TransactionFormView {
        endpoint: &endpoint,
        method: FormMethod::Put,
        transaction_type: transaction.transaction_type,
        description: &transaction.description,
        amount: Some(transaction.amount),
        date: transaction.date,
        source: "",
        category_id: transaction.category.as_ref().map(|category| category.id),
        options: &options,
        error_message: "",
        is_demo: session.is_demo(),
    });

    Ok(form_page("Edit Transaction", endpoints::TRANSACTIONS_VIEW, &form).into_response())
}

/// Handle transaction edit form submission.
///
/// An empty source keeps the transaction's current account or credit card.
pub async fn update_transaction_endpoint(
    Path(transaction_id): Path<i64>,
    Query(query): Query<MonthQuery>,
    State(state): State<ApiState>,
    Extension(session): Extension<Session>,
    Form(form): Form<TransactionForm>,
) -> Response {
    if let Err(error) = ensure_not_demo(&session) {
        return error.into_alert_response();
    }

    let month = MonthYear::from_query(&query, form.date);

    let options = match FormOptions::fetch(&state.api, &session.api_token).await {
        Ok(options) => options,
        Err(error) => {
            tracing::error!("Could not get transaction form options: {error}");
            return error.into_alert_response();
        }
    };

    let transaction = match NewTransaction::from_form(&form, &options.categories, false) {
        Ok(transaction) => transaction,
        Err(error) => {
            return transaction_form_view(TransactionFormView {
                endpoint: &update_endpoint(transaction_id, month),
                method: FormMethod::Put,
                transaction_type: form.transaction_type,
                description: &form.description,
                amount: Some(form.amount),
                date: form.date,
                source: &form.source,
                category_id: form.category_id,
                options: &options,
                error_message: &format!("Error: {error}"),
                is_demo: false,
            })
            .into_response();
        }
    };

    match update_transaction(&state.api, &session.api_token, transaction_id, &transaction).await {
        Ok(()) => {
            let redirect_url =
                format!("{}?{}", endpoints::TRANSACTIONS_VIEW, month.to_query_string());

            (HxRedirect(redirect_url), StatusCode::SEE_OTHER).into_response()
        }
        Err(error) => {
            tracing::error!(
                "An unexpected error occurred while updating transaction {transaction_id}: {error}"
            );
            error.into_alert_response()
        }
    }
}
