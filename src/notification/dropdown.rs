//! The notification bell and its dropdown of unread notifications.
//!
//! The navigation bar loads this fragment with HTMX once the page has loaded,
//! so a slow or failing API never holds up the page itself.

use axum::{
    Extension,
    extract::State,
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use time::PrimitiveDateTime;

use crate::{
    Error,
    app_state::ApiState,
    auth::{DEMO_LOCKED_LABEL, Session},
    endpoints::{self, format_endpoint},
    notification::{Notification, get_notifications, relative_time},
    timezone::current_local_date_time,
};

/// Render the bell for the unread items in `notifications`.
fn notifications_view(
    notifications: &[Notification],
    now: PrimitiveDateTime,
    is_demo: bool,
) -> Markup {
    let unread: Vec<&Notification> = notifications
        .iter()
        .filter(|notification| !notification.is_read)
        .collect();

    html! {
        div id="notifications" class="relative"
        {
            details class="group"
            {
                summary
                    class="list-none [&::-webkit-details-marker]:hidden relative
                    cursor-pointer rounded-full p-2 text-gray-600 hover:bg-gray-100
                    dark:text-gray-300 dark:hover:bg-gray-800"
                    aria-label="Notifications"
                {
                    span aria-hidden="true" { "🔔" }

                    @if !unread.is_empty() {
                        span
                            data-unread-dot
                            class="absolute top-1 right-1 h-2 w-2 rounded-full bg-red-500 animate-pulse"
                        {}
                    }
                }

                div
                    class="absolute right-0 z-50 mt-2 w-80 rounded-xl border border-gray-200
                    bg-white shadow-xl dark:border-gray-700 dark:bg-gray-900"
                {
                    div
                        class="flex items-center justify-between border-b border-gray-200
                        px-4 py-3 dark:border-gray-700"
                    {
                        h3 class="text-sm font-semibold text-gray-900 dark:text-white" { "Notifications" }

                        @if !unread.is_empty() {
                            span data-unread-count class="text-xs text-blue-600 dark:text-blue-400"
                            {
                                (unread.len()) " new"
                            }
                        }
                    }

                    @if unread.is_empty() {
                        p class="px-4 py-6 text-center text-sm text-gray-500 dark:text-gray-400"
                        {
                            "No new notifications"
                        }
                    } @else {
                        ul class="max-h-80 overflow-y-auto divide-y divide-gray-100 dark:divide-gray-800"
                        {
                            @for notification in unread {
                                (notification_item(notification, now, is_demo))
                            }
                        }
                    }
                }
            }
        }
    }
}

fn notification_item(notification: &Notification, now: PrimitiveDateTime, is_demo: bool) -> Markup {
    let read_url = format_endpoint(endpoints::NOTIFICATION_READ, notification.id);

    html! {
        li data-notification=(notification.id) class="flex items-start gap-3 px-4 py-3"
        {
            div class="flex-1 min-w-0"
            {
                p class="text-sm text-gray-900 dark:text-white" { (notification.message) }
                p data-notification-time class="mt-1 text-xs text-gray-500 dark:text-gray-400"
                {
                    (relative_time(notification.created_at, now))
                }
            }

            @if is_demo {
                button type="button" disabled class="text-xs text-gray-400" { (DEMO_LOCKED_LABEL) }
            } @else {
                button
                    type="button"
                    hx-patch=(read_url)
                    hx-target="#notifications"
                    hx-swap="outerHTML"
                    hx-target-error="#alert-container"
                    aria-label="Mark as read"
                    class="rounded-full p-1 text-green-600 hover:bg-green-50 dark:hover:bg-gray-800"
                {
                    "✓"
                }
            }
        }
    }
}

/// Render the bell with the user's unread notifications.
///
/// Errors other than an expired session are logged and show an empty bell.
pub async fn get_notifications_fragment(
    State(state): State<ApiState>,
    Extension(session): Extension<Session>,
) -> Response {
    match render_notifications(&state, &session).await {
        Ok(markup) => markup.into_response(),
        Err(Error::SessionExpired) => Error::SessionExpired.into_alert_response(),
        Err(error) => {
            tracing::error!("Could not load notifications: {error}");
            empty_bell(&state, &session).into_response()
        }
    }
}

/// Fetch the unread notifications and render the bell.
pub(super) async fn render_notifications(
    state: &ApiState,
    session: &Session,
) -> Result<Markup, Error> {
    let notifications = get_notifications(&state.api, &session.api_token).await?;
    let now = current_local_date_time(&state.local_timezone)?;

    Ok(notifications_view(&notifications, now, session.is_demo()))
}

fn empty_bell(state: &ApiState, session: &Session) -> Markup {
    let now = current_local_date_time(&state.local_timezone)
        .unwrap_or_else(|_| PrimitiveDateTime::MIN);

    notifications_view(&[], now, session.is_demo())
}
