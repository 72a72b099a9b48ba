use time::{Duration, OffsetDateTime};

use crate::auth::{DEMO_EMAIL, Session};

pub(crate) fn test_session() -> Session {
    Session {
        api_token: "test-token".to_owned(),
        email: "user@example.com".to_owned(),
        name: Some("Test User".to_owned()),
        expires_at: OffsetDateTime::now_utc() + Duration::minutes(5),
    }
}

pub(crate) fn demo_session() -> Session {
    Session {
        email: DEMO_EMAIL.to_owned(),
        name: Some("Demo".to_owned()),
        ..test_session()
    }
}
