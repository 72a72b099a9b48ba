//! Recurring transaction deletion endpoint.

use axum::{
    Extension,
    extract::{Path, State},
    response::{IntoResponse, Response},
};

use crate::{
    alert::Alert,
    app_state::ApiState,
    auth::{Session, ensure_not_demo},
    recurring::delete_recurring,
};

/// Handle recurring transaction deletion. Returns success alert or error.
pub async fn delete_recurring_endpoint(
    Path(recurring_id): Path<i64>,
    State(state): State<ApiState>,
    Extension(session): Extension<Session>,
) -> Response {
    if let Err(error) = ensure_not_demo(&session) {
        return error.into_alert_response();
    }

    match delete_recurring(&state.api, &session.api_token, recurring_id).await {
        Ok(()) => Alert::SuccessSimple {
            message: "Recurring transaction deleted successfully".to_owned(),
        }
        .into_response(),
        Err(error) => {
            tracing::error!(
                "An unexpected error occurred while deleting recurring transaction {recurring_id}: {error}"
            );
            error.into_alert_response()
        }
    }
}
