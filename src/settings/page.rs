use axum::{
    Extension,
    extract::State,
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

use crate::{
    Error,
    app_state::ApiState,
    auth::{Session, UserProfile, get_current_user},
    endpoints,
    html::{
        CARD_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, PAGE_CONTAINER_STYLE, base,
        form_error, submit_button, text_input,
    },
    navigation::NavBar,
    settings::profile::initials,
};

/// Render the settings page with the logged in user's profile.
pub async fn get_settings_page(
    State(state): State<ApiState>,
    Extension(session): Extension<Session>,
) -> Result<Response, Error> {
    let profile = get_current_user(&state.api, &session.api_token)
        .await
        .inspect_err(|error| tracing::error!("Could not get profile: {error}"))?;

    let nav_bar = NavBar::new(endpoints::SETTINGS_VIEW).into_html();
    let content = html!(
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            div class="w-full space-y-6 lg:max-w-2xl"
            {
                header
                {
                    h1 class="text-xl font-bold" { "Settings" }
                    p class="text-sm text-gray-500 dark:text-gray-400" { "Manage your profile" }
                }

                section class=(CARD_STYLE)
                {
                    (profile_form_view(&profile, "", session.is_demo()))
                }
            }
        }
    );

    Ok(base("Settings", &[], &content).into_response())
}

pub(super) fn profile_form_view(profile: &UserProfile, error_message: &str, is_demo: bool) -> Markup {
    let plan = profile.plan_type.map_or("Free", |plan| plan.label());

    html!(
        form
            hx-put=(endpoints::PROFILE)
            hx-encoding="multipart/form-data"
            hx-target-error="#alert-container"
            class="w-full space-y-4 md:space-y-6"
        {
            div class="flex flex-col items-center gap-3"
            {
                @if let Some(image) = &profile.profile_image {
                    img
                        src=(image)
                        alt="Profile picture"
                        class="h-24 w-24 rounded-full object-cover"
                        data-profile-image;
                } @else {
                    div
                        class="flex h-24 w-24 items-center justify-center rounded-full bg-gray-100
                        text-2xl font-bold text-gray-500 dark:bg-gray-700 dark:text-gray-300"
                        data-initials
                    {
                        (initials(profile.name.as_deref()))
                    }
                }

                span class="text-sm text-gray-500 dark:text-gray-400" data-plan { (plan) " plan" }
            }

            (text_input("name", "Name", profile.name.as_deref().unwrap_or_default(), "Your name"))

            div
            {
                label for="email" class=(FORM_LABEL_STYLE) { "Email" }
                input
                    id="email"
                    type="email"
                    value=(profile.email)
                    disabled
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div
            {
                label for="profile_image" class=(FORM_LABEL_STYLE) { "Profile picture" }
                input
                    id="profile_image"
                    type="file"
                    name="profile_image"
                    accept="image/png, image/jpeg"
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            (form_error(error_message))
            (submit_button("Save Profile", is_demo))
        }
    )
}
