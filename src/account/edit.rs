//! Account editing page and endpoint.

use axum::{
    Extension, Form,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;

use crate::{
    Error,
    account::{
        AccountForm, NewAccount,
        form::{AccountFormView, account_form_view},
        get_accounts, update_account,
    },
    app_state::ApiState,
    auth::{Session, ensure_not_demo},
    endpoints,
    html::{FormMethod, form_page},
};

/// Render the page for editing the account with `account_id`.
pub async fn get_edit_account_page(
    Path(account_id): Path<i64>,
    State(state): State<ApiState>,
    Extension(session): Extension<Session>,
) -> Result<Response, Error> {
    let account = get_accounts(&state.api, &session.api_token)
        .await
        .inspect_err(|error| tracing::error!("Could not get accounts: {error}"))?
        .into_iter()
        .find(|account| account.id == account_id)
        .ok_or(Error::NotFound)?;

    let endpoint = endpoints::format_endpoint(endpoints::ACCOUNT, account_id);
    let form = account_form_view(AccountFormView {
        endpoint: &endpoint,
        method: FormMethod::Put,
        name: &account.name,
        bank: account.bank.as_deref().unwrap_or_default(),
        initial_balance: Some(account.initial_balance),
        error_message: "",
        is_demo: session.is_demo(),
    });

    Ok(form_page("Edit Account", endpoints::WALLET_VIEW, &form).into_response())
}

/// Handle account edit form submission.
pub async fn update_account_endpoint(
    Path(account_id): Path<i64>,
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
            let endpoint = endpoints::format_endpoint(endpoints::ACCOUNT, account_id);

            return account_form_view(AccountFormView {
                endpoint: &endpoint,
                method: FormMethod::Put,
                name: &form.name,
                bank: &form.bank,
                initial_balance: Some(form.initial_balance),
                error_message: &format!("Error: {error}"),
                is_demo: false,
            })
            .into_response();
        }
    };

    match update_account(&state.api, &session.api_token, account_id, &account).await {
        Ok(()) => (
            HxRedirect(endpoints::WALLET_VIEW.to_owned()),
            StatusCode::SEE_OTHER,
        )
            .into_response(),
        Err(error) => {
            tracing::error!(
                "An unexpected error occurred while updating account {account_id}: {error}"
            );
            error.into_alert_response()
        }
    }
}
