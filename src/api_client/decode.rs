//! Helpers for decoding API responses.

use serde::{Deserialize, Deserializer};
use time::Date;

// (De)serialize a date as an ISO 8601 calendar date, e.g. "2025-03-14".
time::serde::format_description!(
    pub iso_date,
    Date,
    "[year]-[month]-[day]"
);

/// Deserialize a number that the API may send as `null` or leave out, treating both as zero.
///
/// Use together with `#[serde(default)]` so that a missing field is also accepted.
pub fn zero_if_null<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(0.0))
}
