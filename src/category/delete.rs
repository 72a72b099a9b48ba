//! Category deletion endpoint.

use axum::{
    Extension,
    extract::{Path, State},
    response::{IntoResponse, Response},
};

use crate::{
    alert::Alert,
    app_state::ApiState,
    auth::{Session, ensure_not_demo},
    category::delete_category,
};

/// Handle category deletion. Returns success alert or error.
pub async fn delete_category_endpoint(
    Path(category_id): Path<i64>,
    State(state): State<ApiState>,
    Extension(session): Extension<Session>,
) -> Response {
    if let Err(error) = ensure_not_demo(&session) {
        return error.into_alert_response();
    }

    match delete_category(&state.api, &session.api_token, category_id).await {
        Ok(()) => Alert::SuccessSimple {
            message: "Category deleted successfully".to_owned(),
        }
        .into_response(),
        Err(error) => {
            tracing::error!(
                "An unexpected error occurred while deleting category {category_id}: {error}"
            );
            error.into_alert_response()
        }
    }
}

#[cfg(test)]
mod delete_category_endpoint_tests {
    use axum::{
        Extension, Router,
        extract::{Path, State},
        http::StatusCode,
        routing::delete,
    };

    use crate::{
        category::delete_category_endpoint,
        test_utils::{
            api_state, assert_valid_html, demo_session, get_header, parse_html_fragment,
            record_request, recorded_bodies, spawn_mock_api, test_session,
        },
    };

    #[tokio::test]
    async fn delete_category_endpoint_succeeds() {
        let requests = recorded_bodies();
        let api = spawn_mock_api(
            Router::new().route("/api/categories/3", record_request(&requests)),
        )
        .await;

        let response =
            delete_category_endpoint(Path(3), State(api_state(api)), Extension(test_session()))
                .await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(requests.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn delete_missing_category_returns_error_html() {
        let api = spawn_mock_api(Router::new().route(
            "/api/categories/{id}",
            delete(|| async { StatusCode::NOT_FOUND }),
        ))
        .await;

        let response =
            delete_category_endpoint(Path(99), State(api_state(api)), Extension(test_session()))
                .await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            get_header(&response, "content-type"),
            "text/html; charset=utf-8"
        );
        let html = parse_html_fragment(response).await;
        assert_valid_html(&html);
    }

    #[tokio::test]
    async fn demo_session_cannot_delete_category() {
        let requests = recorded_bodies();
        let api = spawn_mock_api(
            Router::new().route("/api/categories/3", record_request(&requests)),
        )
        .await;

        let response =
            delete_category_endpoint(Path(3), State(api_state(api)), Extension(demo_session()))
                .await;

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert!(requests.lock().unwrap().is_empty());
    }
}
