//! Lenient parsing of the order feed's date strings.
//!
//! Orders arrive with whatever the storefront wrote: RFC 3339, ISO without
//! seconds, SQL-style `YYYY-MM-DD HH:MM:SS`, a bare date, or a human date
//! such as `"Jan 5, 2025"`. Anything unparseable yields `None` and the
//! caller drops the record.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::range::midnight;

const DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%b %d %Y", "%B %d %Y", "%d %b %Y", "%m/%d/%Y"];

/// Parses an order date into local wall-clock time.
///
/// Offsets in RFC 3339 input are dropped: `2025-01-05T10:00:00+06:00`
/// becomes `2025-01-05 10:00:00`.
///
/// ## Example
/// ```rust
/// use insight_core::timestamp::parse_order_timestamp;
///
/// assert!(parse_order_timestamp("2025-01-05").is_some());
/// assert!(parse_order_timestamp("Jan 5, 2025").is_some());
/// assert!(parse_order_timestamp("not a date").is_none());
/// ```
pub fn parse_order_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    parse_exact(raw).or_else(|| {
        if raw.contains(',') {
            parse_exact(&raw.replace(',', ""))
        } else {
            None
        }
    })
}

fn parse_exact(raw: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_local());
    }

    DATE_TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
                .map(midnight)
        })
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
    fn test_rfc3339_keeps_wall_clock() {
        assert_eq!(
            parse_order_timestamp("2025-01-05T10:15:00+06:00"),
            Some(at(2025, 1, 5, 10, 15, 0))
        );
        assert_eq!(
            parse_order_timestamp("2025-01-05T10:15:00Z"),
            Some(at(2025, 1, 5, 10, 15, 0))
        );
    }

    #[test]
    fn test_iso_and_sql_formats() {
        assert_eq!(
            parse_order_timestamp("2025-01-05T10:15:30.250"),
            Some(at(2025, 1, 5, 10, 15, 30) + chrono::Duration::milliseconds(250))
        );
        assert_eq!(parse_order_timestamp("2025-01-05T10:15"), Some(at(2025, 1, 5, 10, 15, 0)));
        assert_eq!(parse_order_timestamp("2025-01-05 10:15:30"), Some(at(2025, 1, 5, 10, 15, 30)));
    }

    #[test]
    fn test_bare_date_is_midnight() {
        assert_eq!(parse_order_timestamp(" 2025-01-05 "), Some(at(2025, 1, 5, 0, 0, 0)));
    }

    #[test]
    fn test_human_dates_with_commas() {
        assert_eq!(parse_order_timestamp("Jan 5, 2025"), Some(at(2025, 1, 5, 0, 0, 0)));
        assert_eq!(parse_order_timestamp("January 20, 2025"), Some(at(2025, 1, 20, 0, 0, 0)));
    }

    #[test]
    fn test_garbage_is_none() {
        assert_eq!(parse_order_timestamp(""), None);
        assert_eq!(parse_order_timestamp("yesterday-ish"), None);
        assert_eq!(parse_order_timestamp("2025-13-40"), None);
    }
}
