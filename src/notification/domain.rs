use serde::Deserialize;
use time::PrimitiveDateTime;

mod local_date_time {
    //! Reads the API's local date-times, e.g. "2025-03-14T09:30:00" or
    //! "2025-03-14T09:30:00.123456". They carry no UTC offset.
    use serde::{Deserialize, Deserializer};
    use time::{
        PrimitiveDateTime, format_description::BorrowedFormatItem, macros::format_description,
    };

    const WHOLE_SECONDS: &[BorrowedFormatItem] =
        format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]");
    const FRACTIONAL_SECONDS: &[BorrowedFormatItem] =
        format_description!("[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond]");

    pub fn deserialize<'de, D>(deserializer: D) -> Result<PrimitiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;

        PrimitiveDateTime::parse(&text, WHOLE_SECONDS)
            .or_else(|_| PrimitiveDateTime::parse(&text, FRACTIONAL_SECONDS))
            .map_err(serde::de::Error::custom)
    }
}

/// A message from the API for the logged in user, e.g. a budget alert.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: i64,
    pub message: String,
    /// Some API versions send this flag as "read".
    #[serde(default, alias = "read")]
    pub is_read: bool,
    /// When the notification was created, in the API's local time.
    #[serde(deserialize_with = "local_date_time::deserialize")]
    pub created_at: PrimitiveDateTime,
}

/// How long ago `created_at` was, relative to `now`, e.g. "5 minutes ago".
///
/// Times in the future are treated as just now.
pub fn relative_time(created_at: PrimitiveDateTime, now: PrimitiveDateTime) -> String {
    let elapsed = now - created_at;
    let minutes = elapsed.whole_minutes();

    if minutes < 1 {
        return "Just now".to_owned();
    }

    let (count, unit) = match minutes {
        ..60 => (minutes, "minute"),
        60..1_440 => (elapsed.whole_hours(), "hour"),
        1_440..43_200 => (elapsed.whole_days(), "day"),
        43_200..525_600 => (elapsed.whole_days() / 30, "month"),
        _ => (elapsed.whole_days() / 365, "year"),
    };

    if count == 1 {
        format!("1 {unit} ago")
    } else {
        format!("{count} {unit}s ago")
    }
}
