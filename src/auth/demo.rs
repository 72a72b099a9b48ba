//! Demo mode: a shared account that can browse every page but not change anything.

use crate::{Error, auth::Session};

/// The email of the shared demo account.
pub const DEMO_EMAIL: &str = "demo@lume.app";

/// The password of the shared demo account.
pub const DEMO_PASSWORD: &str = "demo123";

/// The label shown on controls that are disabled in demo mode.
pub const DEMO_LOCKED_LABEL: &str = "Locked (demo)";

/// Refuse mutating actions for demo sessions.
///
/// # Errors
///
/// Returns [Error::DemoMode] if `session` belongs to the demo account.
pub fn ensure_not_demo(session: &Session) -> Result<(), Error> {
    if session.is_demo() {
        tracing::info!("Blocked a mutating request from the demo account");
        Err(Error::DemoMode)
    } else {
        Ok(())
    }
}
