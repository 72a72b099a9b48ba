//! Transaction creation page and endpoint.

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
    endpoints,
    html::{FormMethod, form_page},
    month::MonthYear,
    timezone::current_local_date,
    transaction::{
        NewTransaction, TransactionForm, create_transaction,
        form::{FormOptions, TransactionFormView, transaction_form_view},
    },
    transaction_type::TransactionType,
};

/// Render the page for adding a transaction, dated today.
pub async fn get_new_transaction_page(
    State(state): State<ApiState>,
    Extension(session): Extension<Session>,
) -> Result<Response, Error> {
    let today = current_local_date(&state.local_timezone)?;
    let options = FormOptions::fetch(&state.api, &session.api_token)
        .await
        .inspect_err(|error| tracing::error!("Could not get transaction form options: {error}"))?;

    let form = transaction_form_view(TransactionFormView {
        endpoint: endpoints::TRANSACTIONS_API,
        method: FormMethod::Post,
        transaction_type: TransactionType::Expense,
        description: "",
        amount: None,
        date: today,
        source: "",
        category_id: None,
        options: &options,
        error_message: "",
        is_demo: session.is_demo(),
    });

    Ok(form_page("Add Transaction", endpoints::TRANSACTIONS_VIEW, &form).into_response())
}

/// Handle transaction creation form submission.
///
/// On success the client is redirected to the month of the new transaction.
pub async fn create_transaction_endpoint(
    State(state): State<ApiState>,
    Extension(session): Extension<Session>,
    Form(form): Form<TransactionForm>,
) -> Response {
    if let Err(error) = ensure_not_demo(&session) {
        return error.into_alert_response();
    }

    let options = match FormOptions::fetch(&state.api, &session.api_token).await {
        Ok(options) => options,
        Err(error) => {
            tracing::error!("Could not get transaction form options: {error}");
            return error.into_alert_response();
        }
    };

    let transaction = match NewTransaction::from_form(&form, &options.categories, true) {
        Ok(transaction) => transaction,
        Err(error) => {
            return transaction_form_view(TransactionFormView {
                endpoint: endpoints::TRANSACTIONS_API,
                method: FormMethod::Post,
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

    match create_transaction(&state.api, &session.api_token, &transaction).await {
        Ok(()) => {
            let redirect_url = format!(
                "{}?{}",
                endpoints::TRANSACTIONS_VIEW,
                MonthYear::from_date(transaction.date).to_query_string()
            );

            (HxRedirect(redirect_url), StatusCode::SEE_OTHER).into_response()
        }
        Err(error) => {
            tracing::error!("An unexpected error occurred while creating a transaction: {error}");
            error.into_alert_response()
        }
    }
}
