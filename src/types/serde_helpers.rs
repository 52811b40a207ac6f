//! Custom serde helpers for Binance's serialization quirks.
//!
//! Binance's wallet API predates consistent null handling and timestamp
//! formats. These modules provide reusable serde helpers for the odd cases.

use serde::{Deserialize, Deserializer, de};

/// Helper for empty strings that should be deserialized as None.
///
/// Binance returns `""` instead of omitting fields like `addressTag` or
/// `url` when they do not apply.
///
/// # Example
///
/// ```rust
/// use serde::Deserialize;
/// use binance_api_client::types::serde_helpers::empty_string_as_none;
///
/// #[derive(Deserialize, Debug)]
/// struct Response {
///     #[serde(deserialize_with = "empty_string_as_none::deserialize", default)]
///     tag: Option<String>,
/// }
///
/// let json = r#"{"tag":""}"#;
/// let response: Response = serde_json::from_str(json).unwrap();
/// assert!(response.tag.is_none());
///
/// let json = r#"{"tag":"342341222"}"#;
/// let response: Response = serde_json::from_str(json).unwrap();
/// assert_eq!(response.tag.unwrap(), "342341222");
/// ```
pub mod empty_string_as_none {
    use super::*;

    /// Deserialize a string, returning None if empty.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = Option::<String>::deserialize(deserializer)?;
        Ok(s.filter(|s| !s.is_empty()))
    }
}

/// Helper for Binance's `"2019-10-12 11:12:02"` datetime format.
///
/// The withdrawal history endpoint reports `applyTime` as a space-separated
/// datetime in UTC rather than an epoch timestamp.
///
/// # Example
///
/// ```rust
/// use serde::Deserialize;
/// use time::PrimitiveDateTime;
/// use binance_api_client::types::serde_helpers::space_separated_datetime;
///
/// #[derive(Deserialize, Debug)]
/// struct Response {
///     #[serde(deserialize_with = "space_separated_datetime::deserialize")]
///     apply_time: PrimitiveDateTime,
/// }
///
/// let json = r#"{"apply_time":"2019-10-12 11:12:02"}"#;
/// let response: Response = serde_json::from_str(json).unwrap();
/// assert_eq!(response.apply_time.to_string(), "2019-10-12 11:12:02.0");
/// ```
pub mod space_separated_datetime {
    use super::*;
    use time::PrimitiveDateTime;
    use time::format_description::BorrowedFormatItem;
    use time::macros::format_description;

    const FORMAT: &[BorrowedFormatItem<'_>] =
        format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

    /// Deserialize a `YYYY-MM-DD hh:mm:ss` string.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<PrimitiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        PrimitiveDateTime::parse(&s, FORMAT).map_err(de::Error::custom)
    }
}
