//! Asset deletion endpoint.

use axum::{
    Extension,
    extract::{Path, State},
    response::{IntoResponse, Response},
};

use crate::{
    alert::Alert,
    app_state::ApiState,
    asset::delete_asset,
    auth::{Session, ensure_not_demo},
};

/// Handle asset deletion. Returns success alert or error.
pub async fn delete_asset_endpoint(
    Path(asset_id): Path<i64>,
    State(state): State<ApiState>,
    Extension(session): Extension<Session>,
) -> Response {
    if let Err(error) = ensure_not_demo(&session) {
        return error.into_alert_response();
    }

    match delete_asset(&state.api, &session.api_token, asset_id).await {
        Ok(()) => Alert::SuccessSimple {
            message: "Asset deleted successfully".to_owned(),
        }
        .into_response(),
        Err(error) => {
            tracing::error!(
                "An unexpected error occurred while deleting asset {asset_id}: {error}"
            );
            error.into_alert_response()
        }
    }
}

#[cfg(test)]
mod delete_asset_endpoint_tests {
    use axum::{
        Extension, Router,
        extract::{Path, State},
        http::StatusCode,
        routing::delete,
    };

    use crate::{
        asset::delete_asset_endpoint,
        test_utils::{
            api_state, demo_session, record_request, recorded_bodies, spawn_mock_api,
            test_session,
        },
    };

    #[tokio::test]
    async fn can_delete_asset() {
        let requests = recorded_bodies();
        let api =
            spawn_mock_api(Router::new().route("/api/assets/7", record_request(&requests))).await;

        let response =
            delete_asset_endpoint(Path(7), State(api_state(api)), Extension(test_session())).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(requests.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn delete_missing_asset_is_not_found() {
        let api = spawn_mock_api(
            Router::new().route("/api/assets/{id}", delete(|| async { StatusCode::NOT_FOUND })),
        )
        .await;

        let response =
            delete_asset_endpoint(Path(7), State(api_state(api)), Extension(test_session())).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn demo_session_cannot_delete_asset() {
        let requests = recorded_bodies();
        let api =
            spawn_mock_api(Router::new().route("/api/assets/7", record_request(&requests))).await;

        let response =
            delete_asset_endpoint(Path(7), State(api_state(api)), Extension(demo_session())).await;

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert!(requests.lock().unwrap().is_empty());
    }
}
