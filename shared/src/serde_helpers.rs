//! Serde helpers for employee payloads
//!
//! Timestamps arrive in a handful of shapes from API clients:
//! - naive `2024-01-01T00:00:00` (optionally with fractional seconds)
//! - RFC 3339 with an offset or `Z` (normalized to UTC)
//! - space separator instead of `T`
//! - a bare date `2024-01-01` (midnight)

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer};

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Parse a client-supplied timestamp into a naive UTC datetime
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_utc());
    }

    for format in NAIVE_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
            return Some(dt);
        }
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Distinguish an explicit `null` from an absent field
///
/// Use with `#[serde(default, deserialize_with = "double_option")]`:
/// absent → `None`, `null` → `Some(None)`, value → `Some(Some(v))`.
pub fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, s)
            .unwrap()
    }

    #[test]
    fn parses_naive_iso() {
        assert_eq!(
            parse_timestamp("2024-01-01T00:00:00"),
            Some(at(2024, 1, 1, 0, 0, 0))
        );
        assert_eq!(
            parse_timestamp("2024-03-15T09:30:00.250").map(|d| d.and_utc().timestamp_subsec_millis()),
            Some(250)
        );
    }

    #[test]
    fn parses_offset_as_utc() {
        assert_eq!(
            parse_timestamp("2024-01-01T02:00:00+02:00"),
            Some(at(2024, 1, 1, 0, 0, 0))
        );
        assert_eq!(
            parse_timestamp("2024-01-01T00:00:00Z"),
            Some(at(2024, 1, 1, 0, 0, 0))
        );
    }

    #[test]
    fn parses_space_separator_and_bare_date() {
        assert_eq!(
            parse_timestamp("2024-05-02 08:15:00"),
            Some(at(2024, 5, 2, 8, 15, 0))
        );
        assert_eq!(parse_timestamp("2024-05-02"), Some(at(2024, 5, 2, 0, 0, 0)));
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(parse_timestamp("yesterday"), None);
        assert_eq!(parse_timestamp("2024-13-01T00:00:00"), None);
        assert_eq!(parse_timestamp(""), None);
    }

    #[derive(Deserialize)]
    struct Patch {
        #[serde(default, deserialize_with = "double_option")]
        phone: Option<Option<String>>,
    }

    #[test]
    fn double_option_distinguishes_null_from_absent() {
        let absent: Patch = serde_json::from_str("{}").unwrap();
        assert_eq!(absent.phone, None);

        let null: Patch = serde_json::from_str(r#"{"phone": null}"#).unwrap();
        assert_eq!(null.phone, Some(None));

        let set: Patch = serde_json::from_str(r#"{"phone": "555"}"#).unwrap();
        assert_eq!(set.phone, Some(Some("555".to_string())));
    }
}
