//! Account deletion endpoint.

use axum::{
    Extension,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{
    Error,
    account::delete_account,
    alert::Alert,
    api_client::ApiError,
    app_state::ApiState,
    auth::{Session, ensure_not_demo},
};

/// Handle account deletion. Returns success alert or error.
///
/// The API refuses to delete accounts that still have transactions.
pub async fn delete_account_endpoint(
    Path(account_id): Path<i64>,
    State(state): State<ApiState>,
    Extension(session): Extension<Session>,
) -> Response {
    if let Err(error) = ensure_not_demo(&session) {
        return error.into_alert_response();
    }

    match delete_account(&state.api, &session.api_token, account_id).await {
        Ok(()) => Alert::SuccessSimple {
            message: "Account deleted successfully".to_owned(),
        }
        .into_response(),
        Err(Error::Api(ApiError::Conflict(_))) => (
            StatusCode::CONFLICT,
            Alert::Error {
                message: "Could not delete account".to_owned(),
                details: "Conflict: there are records linked to this account.".to_owned(),
            }
            .into_html(),
        )
            .into_response(),
        Err(error) => {
            tracing::error!(
                "An unexpected error occurred while deleting account {account_id}: {error}"
            );
            error.into_alert_response()
        }
    }
}

#[cfg(test)]
mod delete_account_endpoint_tests {
    use axum::{
        Extension, Router,
        extract::{Path, State},
        http::StatusCode,
        routing::delete,
    };

    use crate::{
        account::delete_account_endpoint,
        test_utils::{
            api_state, assert_valid_html, demo_session, parse_html_fragment, record_request,
            recorded_bodies, spawn_mock_api, test_session,
        },
    };

    #[tokio::test]
    async fn delete_account_endpoint_succeeds() {
        let requests = recorded_bodies();
        let api =
            spawn_mock_api(Router::new().route("/api/accounts/2", record_request(&requests))).await;

        let response =
            delete_account_endpoint(Path(2), State(api_state(api)), Extension(test_session()))
                .await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(requests.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn linked_records_show_conflict_message() {
        let api = spawn_mock_api(Router::new().route(
            "/api/accounts/{id}",
            delete(|| async { StatusCode::CONFLICT }),
        ))
        .await;

        let response =
            delete_account_endpoint(Path(2), State(api_state(api)), Extension(test_session()))
                .await;

        assert_eq!(response.status(), StatusCode::CONFLICT);
        let html = parse_html_fragment(response).await;
        assert_valid_html(&html);
        let text = html.root_element().text().collect::<String>();
        assert!(text.contains("Conflict: there are records linked to this account."));
    }

    #[tokio::test]
    async fn demo_session_cannot_delete_account() {
        let requests = recorded_bodies();
        let api =
            spawn_mock_api(Router::new().route("/api/accounts/2", record_request(&requests))).await;

        let response =
            delete_account_endpoint(Path(2), State(api_state(api)), Extension(demo_session()))
                .await;

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert!(requests.lock().unwrap().is_empty());
    }
}
