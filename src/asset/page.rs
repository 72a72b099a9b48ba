//! The assets page.

use axum::{
    Extension,
    extract::State,
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

use crate::{
    Error,
    app_state::ApiState,
    asset::{Asset, get_assets, total_asset_value},
    auth::Session,
    endpoints,
    html::{
        BADGE_STYLE, CARD_STYLE, LINK_STYLE, PAGE_CONTAINER_STYLE, base, edit_delete_action_links,
        format_currency,
    },
    navigation::NavBar,
};

/// Render the user's assets and their combined value.
pub async fn get_assets_page(
    State(state): State<ApiState>,
    Extension(session): Extension<Session>,
) -> Result<Response, Error> {
    let assets = get_assets(&state.api, &session.api_token)
        .await
        .inspect_err(|error| tracing::error!("Could not get assets: {error}"))?;

    Ok(assets_view(&assets, session.is_demo()).into_response())
}

fn assets_view(assets: &[Asset], is_demo: bool) -> Markup {
    let nav_bar = NavBar::new(endpoints::ASSETS_VIEW).into_html();

    let content = html!(
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            div class="w-full space-y-6 lg:max-w-5xl"
            {
                header class="flex justify-between flex-wrap items-end"
                {
                    h1 class="text-xl font-bold" { "Assets" }
                    a href=(endpoints::NEW_ASSET_VIEW) class=(LINK_STYLE) { "Add Asset" }
                }

                section class=(CARD_STYLE)
                {
                    p class="text-sm text-gray-500 dark:text-gray-400" { "Total assets" }
                    p class="text-2xl font-bold tabular-nums" data-total-assets
                    {
                        (format_currency(total_asset_value(assets)))
                    }
                }

                ul class="grid gap-4 md:grid-cols-2 lg:grid-cols-3"
                {
                    @for asset in assets {
                        li class={ (CARD_STYLE) " space-y-2" } data-asset-card="true"
                        {
                            div class="flex items-start justify-between gap-3"
                            {
                                h2 class="font-semibold" { (asset.name) }
                                span class=(BADGE_STYLE) { (asset.asset_type.label()) }
                            }

                            p class="text-xl font-bold tabular-nums" data-asset-value
                            {
                                (format_currency(asset.value))
                            }

                            div class="flex items-center gap-4 text-sm"
                            {
                                (edit_delete_action_links(
                                    &endpoints::format_endpoint(endpoints::EDIT_ASSET_VIEW, asset.id),
                                    &endpoints::format_endpoint(endpoints::ASSET, asset.id),
                                    &format!("Are you sure you want to delete '{}'?", asset.name),
                                    "closest [data-asset-card='true']",
                                    "delete",
                                    is_demo,
                                ))
                            }
                        }
                    }

                    @if assets.is_empty() {
                        li class="py-8 text-center text-sm text-gray-500 dark:text-gray-400 md:col-span-2 lg:col-span-3"
                        {
                            "No assets yet. "
                            a href=(endpoints::NEW_ASSET_VIEW) class=(LINK_STYLE) { "Add your first asset" }
                        }
                    }
                }
            }
        }
    );

    base("Assets", &[], &content)
}
