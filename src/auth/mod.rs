//! Session handling for the REST API token: log in, log out, registration,
//! the auth guard middleware and demo mode.

mod cookie;
mod demo;
mod log_in;
mod log_out;
mod middleware;
mod redirect;
mod register;
mod session;
mod user;

pub use cookie::{DEFAULT_COOKIE_DURATION, invalidate_session_cookie, set_session_cookie};
pub use demo::{DEMO_EMAIL, DEMO_LOCKED_LABEL, DEMO_PASSWORD, ensure_not_demo};
pub use log_in::{LoginState, get_log_in_page, post_demo_log_in, post_log_in};
pub use log_out::get_log_out;
pub use middleware::{AuthState, auth_guard, auth_guard_hx};
pub use redirect::normalize_redirect_url;
pub use register::{get_register_page, register_user};
pub use session::Session;
pub use user::{PlanType, ProfileUpdate, UserProfile, get_current_user, update_current_user};

#[cfg(test)]
pub(crate) use cookie::COOKIE_TOKEN;
