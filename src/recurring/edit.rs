//! Recurring transaction editing page and endpoint.

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
    category::get_categories,
    endpoints,
    html::{FormMethod, form_page},
    recurring::{
        NewRecurring, RecurringForm,
        form::{RecurringFormView, recurring_form_view},
        get_recurring_transactions, update_recurring,
    },
};

/// Render the page for editing the recurring transaction with `recurring_id`.
pub async fn get_edit_recurring_page(
    Path(recurring_id): Path<i64>,
    State(state): State<ApiState>,
    Extension(session): Extension<Session>,
) -> Result<Response, Error> {
    let (recurring, categories) = futures::try_join!(
        get_recurring_transactions(&state.api, &session.api_token),
        get_categories(&state.api, &session.api_token),
    )
    .inspect_err(|error| tracing::error!("Could not get recurring transactions: {error}"))?;

    let recurring = recurring
        .into_iter()
        .find(|recurring| recurring.id == recurring_id)
        .ok_or(Error::NotFound)?;

    let endpoint = endpoints::format_endpoint(endpoints::RECURRING, recurring_id);
    let form = recurring_form_view(RecurringFormView {
        endpoint: &endpoint,
        method: FormMethod::Put,
        transaction_type: recurring.transaction_type,
        description: &recurring.description,
        amount: Some(recurring.amount),
        due_day: Some(recurring.due_day),
        category_id: recurring.category.as_ref().map(|category| category.id),
        categories: &categories,
        error_message: "",
        is_demo: session.is_demo(),
    });

    Ok(form_page("Edit Recurring Transaction", endpoints::RECURRING_VIEW, &form).into_response())
}

/// Handle recurring transaction edit form submission.
pub async fn update_recurring_endpoint(
    Path(recurring_id): Path<i64>,
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
            let endpoint = endpoints::format_endpoint(endpoints::RECURRING, recurring_id);

            return recurring_form_view(RecurringFormView {
                endpoint: &endpoint,
                method: FormMethod::Put,
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

    match update_recurring(&state.api, &session.api_token, recurring_id, &recurring).await {
        Ok(()) => (
            HxRedirect(endpoints::RECURRING_VIEW.to_owned()),
            StatusCode::SEE_OTHER,
        )
            .into_response(),
        Err(error) => {
            tracing::error!(
                "An unexpected error occurred while updating recurring transaction {recurring_id}: {error}"
            );
            error.into_alert_response()
        }
    }
}
