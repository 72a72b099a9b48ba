//! Asset editing page and endpoint.

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
    asset::{
        AssetForm, NewAsset,
        form::{AssetFormView, asset_form_view},
        get_assets, update_asset,
    },
    auth::{Session, ensure_not_demo},
    endpoints,
    html::{FormMethod, form_page},
};

/// Render the page for editing the asset with `asset_id`.
pub async fn get_edit_asset_page(
    Path(asset_id): Path<i64>,
    State(state): State<ApiState>,
    Extension(session): Extension<Session>,
) -> Result<Response, Error> {
    let asset = get_assets(&state.api, &session.api_token)
        .await
        .inspect_err(|error| tracing::error!("Could not get assets: {error}"))?
        .into_iter()
        .find(|asset| asset.id == asset_id)
        .ok_or(Error::NotFound)?;

    let endpoint = endpoints::format_endpoint(endpoints::ASSET, asset_id);
    let form = asset_form_view(AssetFormView {
        endpoint: &endpoint,
        method: FormMethod::Put,
        name: &asset.name,
        value: Some(asset.value),
        asset_type: asset.asset_type,
        error_message: "",
        is_demo: session.is_demo(),
    });

    Ok(form_page("Edit Asset", endpoints::ASSETS_VIEW, &form).into_response())
}

/// Handle asset edit form submission.
pub async fn update_asset_endpoint(
    Path(asset_id): Path<i64>,
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
            let endpoint = endpoints::format_endpoint(endpoints::ASSET, asset_id);

            return asset_form_view(AssetFormView {
                endpoint: &endpoint,
                method: FormMethod::Put,
                name: &form.name,
                value: Some(form.value),
                asset_type: form.asset_type,
                error_message: &format!("Error: {error}"),
                is_demo: false,
            })
            .into_response();
        }
    };

    match update_asset(&state.api, &session.api_token, asset_id, &asset).await {
        Ok(()) => (
            HxRedirect(endpoints::ASSETS_VIEW.to_owned()),
            StatusCode::SEE_OTHER,
        )
            .into_response(),
        Err(error) => {
            tracing::error!("An unexpected error occurred while updating asset {asset_id}: {error}");
            error.into_alert_response()
        }
    }
}

#[cfg(test)]
mod edit_asset_tests {
    use axum::{
        Extension, Form, Json, Router,
        extract::{Path, State},
        http::StatusCode,
        routing::get,
    };
    use scraper::Selector;
    use serde_json::json;

    use crate::{
        Error,
        asset::{AssetForm, AssetType, get_edit_asset_page, update_asset_endpoint},
        endpoints,
        test_utils::{
            api_state, assert_form_input_with_value, assert_hx_endpoint, assert_hx_redirect,
            must_get_form, parse_html_document, record_json_body, recorded_bodies,
            spawn_mock_api, test_session,
        },
    };

    async fn assets_api() -> crate::api_client::ApiClient {
        spawn_mock_api(Router::new().route(
            "/api/assets",
            get(|| async {
                Json(json!([{ "id": 7, "name": "Flat", "value": 350000.0, "type": "PROPERTY" }]))
            }),
        ))
        .await
    }

    #[tokio::test]
    async fn render_page() {
        let api = assets_api().await;

        let response =
            get_edit_asset_page(Path(7), State(api_state(api)), Extension(test_session()))
                .await
                .unwrap();

        let html = parse_html_document(response).await;
        let form = must_get_form(&html);
        assert_hx_endpoint(&form, &endpoints::format_endpoint(endpoints::ASSET, 7), "hx-put");
        assert_form_input_with_value(&form, "name", "text", "Flat");
        assert_form_input_with_value(&form, "value", "number", "350000.00");
        let selected = form
            .select(&Selector::parse("select[name=type] option[selected]").unwrap())
            .next()
            .and_then(|option| option.value().attr("value"));
        assert_eq!(selected, Some("PROPERTY"));
    }

    #[tokio::test]
    async fn missing_asset_is_not_found() {
        let api = assets_api().await;

        let result =
            get_edit_asset_page(Path(1), State(api_state(api)), Extension(test_session())).await;

        assert!(matches!(result, Err(Error::NotFound)));
    }

    #[tokio::test]
    async fn can_update_asset() {
        let bodies = recorded_bodies();
        let api =
            spawn_mock_api(Router::new().route("/api/assets/7", record_json_body(&bodies))).await;
        let form = AssetForm {
            name: "Flat".to_owned(),
            value: 360000.0,
            asset_type: AssetType::Property,
        };

        let response = update_asset_endpoint(
            Path(7),
            State(api_state(api)),
            Extension(test_session()),
            Form(form),
        )
        .await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_hx_redirect(&response, endpoints::ASSETS_VIEW);
        assert_eq!(
            *bodies.lock().unwrap(),
            vec![json!({ "name": "Flat", "value": 360000.0, "type": "PROPERTY" })]
        );
    }
}
