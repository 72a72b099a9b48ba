//! Defines functions for storing the user's session in a private cookie.

use std::cmp::max;

use axum_extra::extract::{
    PrivateCookieJar,
    cookie::{Cookie, SameSite},
};
use time::{Duration, OffsetDateTime};

use crate::{Error, auth::Session};

pub(crate) const COOKIE_TOKEN: &str = "token";
/// The default duration for which auth cookies are valid.
pub const DEFAULT_COOKIE_DURATION: Duration = Duration::minutes(5);

/// Add the session cookie to the cookie jar, indicating that a user is logged in.
///
/// The cookie expires at `session.expires_at`.
///
/// # Errors
///
/// Returns an [Error::JSONSerializationError] if the session cannot be serialized.
pub fn set_session_cookie(
    jar: PrivateCookieJar,
    session: &Session,
) -> Result<PrivateCookieJar, Error> {
    let session_string = serde_json::to_string(session)
        .map_err(|error| Error::JSONSerializationError(error.to_string()))?;

    Ok(jar.add(
        Cookie::build((COOKIE_TOKEN, session_string))
            .expires(session.expires_at)
            .http_only(true)
            .same_site(SameSite::Strict)
            .secure(true),
    ))
}

/// Set the session cookie to an invalid value and set its max age to zero, which should delete the cookie on the client side.
pub fn invalidate_session_cookie(jar: PrivateCookieJar) -> PrivateCookieJar {
    jar.add(
        Cookie::build((COOKIE_TOKEN, "deleted"))
            .expires(OffsetDateTime::UNIX_EPOCH)
            .max_age(Duration::ZERO)
            .http_only(true)
            .same_site(SameSite::Strict)
            .secure(true),
    )
}

/// Read the session from the cookie jar.
///
/// # Errors
///
/// Returns:
/// - [Error::CookieMissing] if there is no session cookie.
/// - [Error::InvalidCookie] if the cookie cannot be decoded or the session has expired.
pub fn get_session_from_cookies(jar: &PrivateCookieJar) -> Result<Session, Error> {
    let cookie = jar.get(COOKIE_TOKEN).ok_or(Error::CookieMissing)?;
    let session: Session = serde_json::from_str(cookie.value_trimmed())
        .map_err(|error| Error::InvalidCookie(error.to_string()))?;

    if session.expires_at <= OffsetDateTime::now_utc() {
        return Err(Error::InvalidCookie("session expired".to_owned()));
    }

    Ok(session)
}

/// Set the expiry of the session cookie in `jar` to the latest of UTC now
/// plus `duration` and the session's current expiry.
///
/// # Errors
///
/// The cookie jar is not modified if an error is returned.
///
/// Returns:
/// - [Error::CookieMissing] or [Error::InvalidCookie] if the session cannot be read.
/// - [Error::InvalidCookie] if extending the cookie by `duration` would overflow the date time.
pub(crate) fn extend_session_cookie_duration_if_needed(
    jar: PrivateCookieJar,
    duration: Duration,
) -> Result<PrivateCookieJar, Error> {
    let mut session = get_session_from_cookies(&jar)?;

    let new_expiry = OffsetDateTime::now_utc()
        .checked_add(duration)
        .ok_or_else(|| Error::InvalidCookie("cookie expiry overflowed".to_owned()))?;

    session.expires_at = max(session.expires_at, new_expiry);

    set_session_cookie(jar, &session)
}
