use axum::{
    Extension,
    extract::{FromRef, Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::{PrivateCookieJar, cookie::Key};
use axum_htmx::HxRedirect;

use crate::{
    AppState, Error,
    api_client::ApiClient,
    auth::{
        ProfileUpdate, Session, UserProfile, ensure_not_demo, get_current_user,
        set_session_cookie, update_current_user,
    },
    endpoints,
    settings::{page::profile_form_view, profile::ProfileForm},
};

/// The state needed to update the profile and the session cookie.
#[derive(Debug, Clone)]
pub struct SettingsState {
    /// The key to be used for signing and encrypting private cookies.
    pub cookie_key: Key,
    pub api: ApiClient,
}

impl FromRef<AppState> for SettingsState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            cookie_key: state.cookie_key.clone(),
            api: state.api.clone(),
        }
    }
}

impl FromRef<SettingsState> for Key {
    fn from_ref(state: &SettingsState) -> Self {
        state.cookie_key.clone()
    }
}

/// Handle the profile form: save the name and picture, then refresh the name in the session.
pub async fn update_profile_endpoint(
    State(state): State<SettingsState>,
    Extension(session): Extension<Session>,
    jar: PrivateCookieJar,
    multipart: Multipart,
) -> Response {
    if let Err(error) = ensure_not_demo(&session) {
        return error.into_alert_response();
    }

    let form = match ProfileForm::from_multipart(multipart).await {
        Ok(form) => form,
        Err(error @ Error::EmptyField(_)) => {
            return match get_current_user(&state.api, &session.api_token).await {
                Ok(profile) => {
                    profile_form_view(&profile, &format!("Error: {error}"), false).into_response()
                }
                Err(error) => error.into_alert_response(),
            };
        }
        Err(error) => return error.into_alert_response(),
    };

    match save_profile(&state.api, &session.api_token, &form).await {
        Ok(profile) => {
            let session = Session {
                name: profile.name,
                ..session
            };

            match set_session_cookie(jar, &session) {
                Ok(jar) => (
                    StatusCode::SEE_OTHER,
                    HxRedirect(endpoints::SETTINGS_VIEW.to_owned()),
                    jar,
                )
                    .into_response(),
                Err(error) => {
                    tracing::error!("Could not refresh the session after a profile update: {error}");
                    error.into_alert_response()
                }
            }
        }
        Err(error) => {
            tracing::error!("An unexpected error occurred while updating the profile: {error}");
            error.into_alert_response()
        }
    }
}

/// Send the profile update, keeping the current picture when no new one was uploaded.
async fn save_profile(api: &ApiClient, token: &str, form: &ProfileForm) -> Result<UserProfile, Error> {
    let profile_image = match &form.image {
        Some(image) => Some(image.to_data_url()),
        None => get_current_user(api, token).await?.profile_image,
    };

    let update = ProfileUpdate {
        name: &form.name,
        profile_image: profile_image.as_deref(),
    };

    update_current_user(api, token, &update).await
}

#[cfg(test)]
mod update_profile_tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        Extension, Json, Router,
        extract::State,
        http::StatusCode,
        routing::get,
    };
    use axum_extra::extract::{PrivateCookieJar, cookie::Key};
    use serde_json::{Value, json};
    use sha2::{Digest, Sha512};

    use crate::{
        api_client::ApiClient,
        auth::COOKIE_TOKEN,
        endpoints,
        settings::{profile::profile_tests::must_make_profile_multipart, update_profile_endpoint},
        test_utils::{
            assert_form_error_message, assert_hx_redirect, demo_session, must_get_form,
            parse_html_fragment, spawn_mock_api, test_session,
        },
    };

    use super::SettingsState;

    fn settings_state(api: ApiClient) -> SettingsState {
        let hash = Sha512::digest(b"profile-tests");

        SettingsState {
            cookie_key: Key::from(&hash),
            api,
        }
    }

    /// A mock API that stores the last profile update and echoes it back.
    async fn profile_api(updates: &Arc<Mutex<Vec<Value>>>) -> ApiClient {
        let updates = updates.clone();

        spawn_mock_api(Router::new().route(
            "/api/users/me",
            get(|| async {
                Json(json!({
                    "email": "test@example.com",
                    "name": "Test",
                    "profileImage": "data:image/png;base64,b2xk",
                }))
            })
            .put(move |Json(body): Json<Value>| {
                let updates = updates.clone();

                async move {
                    updates.lock().unwrap().push(body.clone());
                    Json(json!({
                        "email": "test@example.com",
                        "name": body["name"],
                        "profileImage": body["profileImage"],
                    }))
                }
            }),
        ))
        .await
    }

    #[tokio::test]
    async fn uploads_picture_as_data_url_and_refreshes_session() {
        let updates = Arc::new(Mutex::new(Vec::new()));
        let state = settings_state(profile_api(&updates).await);
        let jar = PrivateCookieJar::new(state.cookie_key.clone());
        let multipart = must_make_profile_multipart("Ana Souza", Some(("image/png", &b"hello"[..]))).await;

        let response =
            update_profile_endpoint(State(state), Extension(test_session()), jar, multipart).await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_hx_redirect(&response, endpoints::SETTINGS_VIEW);
        assert_eq!(
            *updates.lock().unwrap(),
            vec![json!({ "name": "Ana Souza", "profileImage": "data:image/png;base64,aGVsbG8=" })]
        );
        let set_cookie = response
            .headers()
            .get_all("set-cookie")
            .iter()
            .filter_map(|value| value.to_str().ok())
            .any(|value| value.starts_with(&format!("{COOKIE_TOKEN}=")));
        assert!(set_cookie, "The session cookie should be refreshed");
    }

    #[tokio::test]
    async fn keeps_current_picture_without_upload() {
        let updates = Arc::new(Mutex::new(Vec::new()));
        let state = settings_state(profile_api(&updates).await);
        let jar = PrivateCookieJar::new(state.cookie_key.clone());
        let multipart = must_make_profile_multipart("Ana", None).await;

        let response =
            update_profile_endpoint(State(state), Extension(test_session()), jar, multipart).await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            *updates.lock().unwrap(),
            vec![json!({ "name": "Ana", "profileImage": "data:image/png;base64,b2xk" })]
        );
    }

    #[tokio::test]
    async fn blank_name_shows_error() {
        let updates = Arc::new(Mutex::new(Vec::new()));
        let state = settings_state(profile_api(&updates).await);
        let jar = PrivateCookieJar::new(state.cookie_key.clone());
        let multipart = must_make_profile_multipart(" ", None).await;

        let response =
            update_profile_endpoint(State(state), Extension(test_session()), jar, multipart).await;

        let html = parse_html_fragment(response).await;
        assert_form_error_message(&must_get_form(&html), "Error: Name cannot be empty");
        assert!(updates.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn non_image_upload_is_rejected() {
        let updates = Arc::new(Mutex::new(Vec::new()));
        let state = settings_state(profile_api(&updates).await);
        let jar = PrivateCookieJar::new(state.cookie_key.clone());
        let multipart = must_make_profile_multipart("Ana", Some(("text/plain", &b"hi"[..]))).await;

        let response =
            update_profile_endpoint(State(state), Extension(test_session()), jar, multipart).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(updates.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn demo_session_cannot_update_profile() {
        let updates = Arc::new(Mutex::new(Vec::new()));
        let state = settings_state(profile_api(&updates).await);
        let jar = PrivateCookieJar::new(state.cookie_key.clone());
        let multipart = must_make_profile_multipart("Ana", None).await;

        let response =
            update_profile_endpoint(State(state), Extension(demo_session()), jar, multipart).await;

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert!(updates.lock().unwrap().is_empty());
    }
}
