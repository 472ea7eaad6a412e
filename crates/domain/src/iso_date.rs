// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Calendar date (de)serialization in `YYYY-MM-DD` form.
//!
//! The backend sometimes returns full ISO 8601 timestamps for date columns.
//! Only the leading date portion is significant, so anything after the
//! first ten characters is ignored on input.

use crate::error::DomainError;
use serde::{Deserialize, Deserializer, Serializer};
use time::Date;

const DATE_FORMAT: &[time::format_description::FormatItem<'_>] =
    time::macros::format_description!("[year]-[month]-[day]");

/// Parses a date from `YYYY-MM-DD` (or a longer ISO timestamp).
///
/// # Errors
///
/// Returns `DomainError::DateParseError` if the leading portion is not a
/// valid calendar date.
pub fn parse(value: &str) -> Result<Date, DomainError> {
    let head: &str = value.get(..10).unwrap_or(value);
    Date::parse(head, DATE_FORMAT).map_err(|e| DomainError::DateParseError {
        date_string: value.to_string(),
        error: e.to_string(),
    })
}

/// Formats a date as `YYYY-MM-DD`.
#[must_use]
pub fn format(date: Date) -> String {
    date.format(DATE_FORMAT)
        .unwrap_or_else(|_| date.to_string())
}

/// Serializes a date as `YYYY-MM-DD`.
///
/// # Errors
///
/// Propagates serializer errors.
pub fn serialize<S: Serializer>(date: &Date, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format(*date))
}

/// Deserializes a date from `YYYY-MM-DD` or an ISO timestamp.
///
/// # Errors
///
/// Returns a deserializer error if the value is not a date string.
pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Date, D::Error> {
    let raw: String = String::deserialize(deserializer)?;
    parse(&raw).map_err(serde::de::Error::custom)
}

/// Same encoding for optional dates; `null` maps to `None`.
pub mod option {
    use serde::{Deserialize, Deserializer, Serializer};
    use time::Date;

    /// Serializes an optional date.
    ///
    /// # Errors
    ///
    /// Propagates serializer errors.
    #[allow(clippy::ref_option)]
    pub fn serialize<S: Serializer>(date: &Option<Date>, serializer: S) -> Result<S::Ok, S::Error> {
        match date {
            Some(date) => serializer.serialize_some(&super::format(*date)),
            None => serializer.serialize_none(),
        }
    }

    /// Deserializes an optional date.
    ///
    /// # Errors
    ///
    /// Returns a deserializer error if a present value is not a date string.
    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Date>, D::Error> {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        match raw {
            Some(raw) if !raw.is_empty() => super::parse(&raw)
                .map(Some)
                .map_err(serde::de::Error::custom),
            _ => Ok(None),
        }
    }
}
