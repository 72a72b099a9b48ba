//! Credit card deletion endpoint.

use axum::{
    Extension,
    extract::{Path, State},
    response::{IntoResponse, Response},
};

use crate::{
    alert::Alert,
    app_state::ApiState,
    auth::{Session, ensure_not_demo},
    credit_card::delete_credit_card,
};

/// Handle credit card deletion. Returns success alert or error.
pub async fn delete_credit_card_endpoint(
    Path(card_id): Path<i64>,
    State(state): State<ApiState>,
    Extension(session): Extension<Session>,
) -> Response {
    if let Err(error) = ensure_not_demo(&session) {
        return error.into_alert_response();
    }

    match delete_credit_card(&state.api, &session.api_token, card_id).await {
        Ok(()) => Alert::SuccessSimple {
            message: "Credit card deleted successfully".to_owned(),
        }
        .into_response(),
        Err(error) => {
            tracing::error!(
                "An unexpected error occurred while deleting credit card {card_id}: {error}"
            );
            error.into_alert_response()
        }
    }
}
