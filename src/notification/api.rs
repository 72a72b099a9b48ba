//! REST API calls for notifications.

use crate::{Error, api_client::ApiClient, notification::Notification};

const NOTIFICATIONS_PATH: &str = "/notifications";

/// The user's unread notifications, newest first.
pub async fn get_notifications(api: &ApiClient, token: &str) -> Result<Vec<Notification>, Error> {
    Ok(api.get(token, NOTIFICATIONS_PATH).await?)
}

pub async fn mark_notification_read(api: &ApiClient, token: &str, id: i64) -> Result<(), Error> {
    Ok(api
        .patch(token, &format!("{NOTIFICATIONS_PATH}/{id}/read"))
        .await?)
}
