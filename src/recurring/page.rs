//! The recurring transactions page.

use axum::{
    Extension,
    extract::State,
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

use crate::{
    Error,
    app_state::ApiState,
    auth::{DEMO_LOCKED_LABEL, Session},
    endpoints,
    html::{
        CARD_STYLE, LINK_STYLE, PAGE_CONTAINER_STYLE, amount_color_style, base,
        edit_delete_action_links, format_currency,
    },
    navigation::NavBar,
    recurring::{RecurringTransaction, get_recurring_transactions},
};

/// Render the list of recurring bills and income.
pub async fn get_recurring_page(
    State(state): State<ApiState>,
    Extension(session): Extension<Session>,
) -> Result<Response, Error> {
    let recurring = get_recurring_transactions(&state.api, &session.api_token)
        .await
        .inspect_err(|error| tracing::error!("Could not get recurring transactions: {error}"))?;

    Ok(recurring_view(&recurring, session.is_demo()).into_response())
}

fn recurring_view(recurring: &[RecurringTransaction], is_demo: bool) -> Markup {
    let nav_bar = NavBar::new(endpoints::RECURRING_VIEW).into_html();

    let content = html!(
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            div class="w-full space-y-6 lg:max-w-5xl"
            {
                header class="flex justify-between flex-wrap items-end"
                {
                    div
                    {
                        h1 class="text-xl font-bold" { "Recurring" }
                        p class="text-sm text-gray-500 dark:text-gray-400"
                        {
                            "Bills and income that repeat every month"
                        }
                    }

                    a href=(endpoints::NEW_RECURRING_VIEW) class=(LINK_STYLE)
                    {
                        "Add Recurring Transaction"
                    }
                }

                ul class="grid gap-4 md:grid-cols-2 lg:grid-cols-3"
                {
                    @for item in recurring {
                        (recurring_card(item, is_demo))
                    }

                    @if recurring.is_empty() {
                        li class="py-8 text-center text-sm text-gray-500 dark:text-gray-400 md:col-span-2 lg:col-span-3"
                        {
                            "No recurring transactions yet. Add rent, subscriptions or your salary to launch them each month. "
                            a href=(endpoints::NEW_RECURRING_VIEW) class=(LINK_STYLE) { "Add one" }
                        }
                    }
                }
            }
        }
    );

    base("Recurring", &[], &content)
}

fn recurring_card(item: &RecurringTransaction, is_demo: bool) -> Markup {
    let amount = item.transaction_type.signed(item.amount);

    html!(
        li class={ (CARD_STYLE) " space-y-3" } data-recurring-card="true"
        {
            div
            {
                h2 class="font-semibold" data-description { (item.description) }
                p class="text-xs text-gray-500 dark:text-gray-400"
                {
                    (item.category.as_ref().map_or("No category", |category| category.name.as_str()))
                }
            }

            div class="flex items-end justify-between"
            {
                div
                {
                    p class={ "text-xl font-bold tabular-nums " (amount_color_style(amount)) } data-amount
                    {
                        (format_currency(amount))
                    }
                    p class="text-xs text-gray-400" data-due-day { "Due on day " (item.due_day) }
                }

                @if is_demo {
                    span class="text-xs text-gray-400 dark:text-gray-500" { (DEMO_LOCKED_LABEL) }
                } @else {
                    button
                        type="button"
                        hx-post=(endpoints::format_endpoint(endpoints::LAUNCH_RECURRING, item.id))
                        hx-target="#alert-container"
                        hx-swap="beforeend"
                        hx-target-error="#alert-container"
                        title="Add this to this month's transactions"
                        class="px-3 py-1.5 text-xs font-medium rounded-lg border border-gray-200 hover:bg-blue-50 hover:text-blue-600 dark:border-gray-600"
                        data-launch
                    {
                        "Launch"
                    }
                }
            }

            div class="flex items-center gap-4 text-sm"
            {
                (edit_delete_action_links(
                    &endpoints::format_endpoint(endpoints::EDIT_RECURRING_VIEW, item.id),
                    &endpoints::format_endpoint(endpoints::RECURRING, item.id),
                    &format!("Are you sure you want to delete '{}'?", item.description),
                    "closest [data-recurring-card='true']",
                    "delete",
                    is_demo,
                ))
            }
        }
    )
}
