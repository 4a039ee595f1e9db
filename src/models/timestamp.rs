//! Provider-specific timestamp handling.
//!
//! Insightly sends UTC timestamps as `2016-03-01 14:05:00` with no offset.
//! RFC 3339 strings are accepted as well.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer};

/// Wire format for Insightly timestamps.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Parse an Insightly timestamp.
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    let raw = raw.trim();
    match DateTime::parse_from_rfc3339(raw) {
        Ok(dt) => Ok(dt.with_timezone(&Utc)),
        Err(_) => NaiveDateTime::parse_from_str(raw, TIMESTAMP_FORMAT).map(|n| n.and_utc()),
    }
}

/// Format a timestamp in the Insightly wire format.
pub fn format_timestamp(value: &DateTime<Utc>) -> String {
    value.format(TIMESTAMP_FORMAT).to_string()
}

/// Deserialize an optional timestamp; empty strings become `None`.
pub(crate) fn deserialize_optional<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw {
        Some(s) if !s.trim().is_empty() => parse_timestamp(&s)
            .map(Some)
            .map_err(serde::de::Error::custom),
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_parse_provider_format() {
        let dt = parse_timestamp("2016-03-01 14:05:09").unwrap();
        assert_eq!((dt.year(), dt.month(), dt.day()), (2016, 3, 1));
        assert_eq!((dt.hour(), dt.minute(), dt.second()), (14, 5, 9));
        assert_eq!(format_timestamp(&dt), "2016-03-01 14:05:09");
    }

    #[test]
    fn test_parse_rfc3339() {
        let dt = parse_timestamp("2016-03-01T14:05:09+02:00").unwrap();
        assert_eq!(dt.hour(), 12);
    }

    #[test]
    fn test_parse_garbage() {
        assert!(parse_timestamp("last tuesday").is_err());
    }
}
