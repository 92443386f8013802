//! Serde adapter for the service's timestamp format.
//!
//! Timestamps are local Moscow time without an offset, written as
//! `yyyy-MM-dd HH:mm:ss` with optional milliseconds (`.fff`).
//!
//! ```rust
//! use chrono::NaiveDateTime;
//! use moysklad_api::rest::resources::common::date;
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize)]
//! struct Document {
//!     #[serde(with = "date")]
//!     moment: NaiveDateTime,
//!     #[serde(default, with = "date::option", skip_serializing_if = "Option::is_none")]
//!     updated: Option<NaiveDateTime>,
//! }
//!
//! let doc: Document = serde_json::from_str(r#"{"moment": "2024-03-01 09:15:00.123"}"#).unwrap();
//! assert_eq!(serde_json::to_string(&doc).unwrap(), r#"{"moment":"2024-03-01 09:15:00.123"}"#);
//! ```

use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serializer};

/// Format written by [`serialize`].
pub const FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// Format accepted by [`deserialize`]; the fraction is optional.
const PARSE_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// Parses a timestamp in the service format.
///
/// # Errors
///
/// Returns the chrono parse error when `value` does not match.
pub fn parse(value: &str) -> Result<NaiveDateTime, chrono::ParseError> {
    NaiveDateTime::parse_from_str(value.trim(), PARSE_FORMAT)
}

/// Serializes a timestamp in the service format.
///
/// # Errors
///
/// Propagates the serializer's error.
pub fn serialize<S: Serializer>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(&value.format(FORMAT))
}

/// Deserializes a timestamp in the service format.
///
/// # Errors
///
/// Fails when the value is not a string in the service format.
pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
    let text = String::deserialize(deserializer)?;
    parse(&text).map_err(serde::de::Error::custom)
}

/// The same adapter for `Option<NaiveDateTime>`; `null` maps to `None`.
pub mod option {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    /// Serializes an optional timestamp.
    ///
    /// # Errors
    ///
    /// Propagates the serializer's error.
    pub fn serialize<S: Serializer>(
        value: &Option<NaiveDateTime>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(value) => super::serialize(value, serializer),
            None => serializer.serialize_none(),
        }
    }

    /// Deserializes an optional timestamp.
    ///
    /// # Errors
    ///
    /// Fails when a present value is not in the service format.
    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<NaiveDateTime>, D::Error> {
        Option::<String>::deserialize(deserializer)?
            .map(|text| super::parse(&text).map_err(serde::de::Error::custom))
            .transpose()
    }
}
