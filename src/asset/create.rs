//! Asset creation page and endpoint.

use axum::{
    Extension, Form,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;

use crate::{
    app_state::ApiState,
    asset::{
        AssetForm, AssetType, NewAsset, create_asset,
        form::{AssetFormView, asset_form_view},
    },
    auth::{Session, ensure_not_demo},
    endpoints,
    html::{FormMethod, form_page},
};

/// Render the page for adding an asset.
pub async fn get_new_asset_page(Extension(session): Extension<Session>) -> Response {
    let form = asset_form_view(AssetFormView {
        endpoint: endpoints::ASSETS_API,
        method: FormMethod::Post,
        name: "",
        value: None,
        asset_type: AssetType::Investment,
        error_message: "",
        is_demo: session.is_demo(),
    });

    form_page("Add Asset", endpoints::ASSETS_VIEW, &form).into_response()
}

/// Handle asset creation form submission.
pub async fn create_asset_endpoint(
    State(state): State<ApiState>,
    Extension(session): Extension<Session>,
    Form(form): Form<AssetForm>,
) -> Response {
    if let Err(error) = ensure_not_demo(&session) {
        return error.into_alert_response();
    }

    let asset = match NewAsset::from_form(&form) {
        Ok(asset) => asset,
        Err(error) => {
            return asset_form_view(AssetFormView {
                endpoint: endpoints::ASSETS_API,
                method: FormMethod::Post,
                name: &form.name,
                value: Some(form.value),
                asset_type: form.asset_type,
                error_message: &format!("Error: {error}"),
                is_demo: false,
            })
            .into_response();
        }
    };

    match create_asset(&state.api, &session.api_token, &asset).await {
        Ok(()) => (
            HxRedirect(endpoints::ASSETS_VIEW.to_owned()),
            StatusCode::SEE_OTHER,
        )
            .into_response(),
        Err(error) => {
            tracing::error!("An unexpected error occurred while creating an asset: {error}");
            error.into_alert_response()
        }
    }
}

#[cfg(test)]
mod create_asset_tests {
    use axum::{Extension, Form, Router, extract::State, http::StatusCode};
    use scraper::Selector;
    use serde_json::json;

    use crate::{
        asset::{AssetForm, AssetType, create_asset_endpoint, get_new_asset_page},
        endpoints,
        test_utils::{
            api_state, assert_form_error_message, assert_form_input, assert_hx_endpoint,
            assert_hx_redirect, assert_valid_html, demo_session, must_get_form,
            parse_html_document, parse_html_fragment, record_json_body, recorded_bodies,
            spawn_mock_api, test_session,
        },
    };

    fn form(name: &str) -> AssetForm {
        AssetForm {
            name: name.to_owned(),
            value: 45000.0,
            asset_type: AssetType::Vehicle,
        }
    }

    #[tokio::test]
    async fn render_page() {
        let response = get_new_asset_page(Extension(test_session())).await;

        assert_eq!(response.status(), StatusCode::OK);
        let html = parse_html_document(response).await;
        assert_valid_html(&html);
        let form = must_get_form(&html);
        assert_hx_endpoint(&form, endpoints::ASSETS_API, "hx-post");
        assert_form_input(&form, "name", "text");
        assert_form_input(&form, "value", "number");
        let types = form
            .select(&Selector::parse("select[name=type] option").unwrap())
            .filter_map(|option| option.value().attr("value"))
            .collect::<Vec<_>>();
        assert_eq!(types, vec!["INVESTMENT", "VEHICLE", "PROPERTY", "OTHER"]);
    }

    #[tokio::test]
    async fn can_create_asset() {
        let bodies = recorded_bodies();
        let api =
            spawn_mock_api(Router::new().route("/api/assets", record_json_body(&bodies))).await;

        let response =
            create_asset_endpoint(State(api_state(api)), Extension(test_session()), Form(form("Car")))
                .await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_hx_redirect(&response, endpoints::ASSETS_VIEW);
        assert_eq!(
            *bodies.lock().unwrap(),
            vec![json!({ "name": "Car", "value": 45000.0, "type": "VEHICLE" })]
        );
    }

    #[tokio::test]
    async fn empty_name_shows_error() {
        let bodies = recorded_bodies();
        let api =
            spawn_mock_api(Router::new().route("/api/assets", record_json_body(&bodies))).await;

        let response =
            create_asset_endpoint(State(api_state(api)), Extension(test_session()), Form(form(" ")))
                .await;

        let html = parse_html_fragment(response).await;
        assert_form_error_message(&must_get_form(&html), "Error: Asset name cannot be empty");
        assert!(bodies.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn demo_session_cannot_create_asset() {
        let bodies = recorded_bodies();
        let api =
            spawn_mock_api(Router::new().route("/api/assets", record_json_body(&bodies))).await;

        let response =
            create_asset_endpoint(State(api_state(api)), Extension(demo_session()), Form(form("Car")))
                .await;

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert!(bodies.lock().unwrap().is_empty());
    }
}
