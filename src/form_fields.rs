//! Decoding helpers for HTML form and query fields.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Deserializer, de::Error as _};

/// Deserialize an optional field where an empty string, e.g. from a `<select>`
/// with a blank "none" option, means `None`.
///
/// Use together with `#[serde(default)]` so that a missing field is also accepted.
pub fn empty_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    match Option::<String>::deserialize(deserializer)? {
        None => Ok(None),
        Some(text) if text.trim().is_empty() => Ok(None),
        Some(text) => text.trim().parse().map(Some).map_err(D::Error::custom),
    }
}

#[cfg(test)]
mod empty_as_none_tests {
    use serde::Deserialize;

    use super::empty_as_none;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Filters {
        #[serde(default, deserialize_with = "empty_as_none")]
        category_id: Option<i64>,
    }

    #[test]
    fn empty_and_missing_are_none() {
        let empty: Filters = serde_urlencoded::from_str("category_id=").unwrap();
        let missing: Filters = serde_urlencoded::from_str("").unwrap();

        assert_eq!(empty, Filters { category_id: None });
        assert_eq!(missing, Filters { category_id: None });
    }

    #[test]
    fn parses_values() {
        let got: Filters = serde_urlencoded::from_str("category_id=12").unwrap();

        assert_eq!(got, Filters { category_id: Some(12) });
    }

    #[test]
    fn invalid_values_are_errors() {
        assert!(serde_urlencoded::from_str::<Filters>("category_id=abc").is_err());
    }
}
