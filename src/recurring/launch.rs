//! Creates this month's transaction from a recurring transaction.

use axum::{
    Extension,
    extract::{Path, State},
    response::{IntoResponse, Response},
};

use crate::{
    alert::Alert,
    app_state::ApiState,
    auth::{Session, ensure_not_demo},
    month::MonthYear,
    recurring::launch_recurring,
    timezone::current_local_date,
};

/// Handle a request to add the recurring transaction with `recurring_id` to the current month.
pub async fn launch_recurring_endpoint(
    Path(recurring_id): Path<i64>,
    State(state): State<ApiState>,
    Extension(session): Extension<Session>,
) -> Response {
    if let Err(error) = ensure_not_demo(&session) {
        return error.into_alert_response();
    }

    let month = match current_local_date(&state.local_timezone) {
        Ok(today) => MonthYear::from_date(today),
        Err(error) => return error.into_alert_response(),
    };

    match launch_recurring(&state.api, &session.api_token, recurring_id, month).await {
        Ok(()) => Alert::Success {
            message: "Transaction created".to_owned(),
            details: format!("It was added to the transactions for {}.", month.label()),
        }
        .into_response(),
        Err(error) => {
            tracing::error!(
                "An unexpected error occurred while launching recurring transaction {recurring_id}: {error}"
            );
            error.into_alert_response()
        }
    }
}
