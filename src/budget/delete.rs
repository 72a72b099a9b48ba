//! Budget deletion endpoint.

use axum::{
    Extension,
    extract::{Path, State},
    response::{IntoResponse, Response},
};

use crate::{
    alert::Alert,
    app_state::ApiState,
    auth::{Session, ensure_not_demo},
    budget::delete_budget,
};

/// Handle budget deletion. Returns success alert or error.
pub async fn delete_budget_endpoint(
    Path(budget_id): Path<i64>,
    State(state): State<ApiState>,
    Extension(session): Extension<Session>,
) -> Response {
    if let Err(error) = ensure_not_demo(&session) {
        return error.into_alert_response();
    }

    match delete_budget(&state.api, &session.api_token, budget_id).await {
        Ok(()) => Alert::SuccessSimple {
            message: "Budget deleted successfully".to_owned(),
        }
        .into_response(),
        Err(error) => {
            tracing::error!("An unexpected error occurred while deleting budget {budget_id}: {error}");
            error.into_alert_response()
        }
    }
}
