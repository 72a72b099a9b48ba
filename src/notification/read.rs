//! Marks a notification as read and re-renders the bell without it.

use axum::{
    Extension,
    extract::{Path, State},
    response::{IntoResponse, Response},
};

use crate::{
    app_state::ApiState,
    auth::{Session, ensure_not_demo},
    notification::{dropdown::render_notifications, mark_notification_read},
};

pub async fn mark_notification_read_endpoint(
    Path(notification_id): Path<i64>,
    State(state): State<ApiState>,
    Extension(session): Extension<Session>,
) -> Response {
    if let Err(error) = ensure_not_demo(&session) {
        return error.into_alert_response();
    }

    let result = async {
        mark_notification_read(&state.api, &session.api_token, notification_id).await?;
        render_notifications(&state, &session).await
    }
    .await;

    match result {
        Ok(markup) => markup.into_response(),
        Err(error) => {
            tracing::error!(
                "An unexpected error occurred while marking notification {notification_id} as read: {error}"
            );
            error.into_alert_response()
        }
    }
}
