//! The notification bell with the user's unread notifications.

mod api;
mod domain;
mod dropdown;
mod read;

pub use api::{get_notifications, mark_notification_read};
pub use domain::{Notification, relative_time};
pub use dropdown::get_notifications_fragment;
pub use read::mark_notification_read_endpoint;
