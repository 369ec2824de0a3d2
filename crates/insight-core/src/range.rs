//! # Range Module
//!
//! Turns a dashboard range selection into a concrete `[start, end)` interval.
//!
//! ## Selection Modes
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Selection   Interval                               Granularity  Buckets│
//! │  ─────────   ─────────────────────────────────────  ───────────  ───────│
//! │  day         [00:00 today, 00:00 tomorrow)          hour         24     │
//! │  month       [1st of anchor month, 1st of next)     day          28-31  │
//! │  year        [Jan 1 (Y-4), Jan 1 (Y+1))             year         5      │
//! │  all         [1st of (month-11), 1st of next month) month        12     │
//! │  custom      [start day 00:00, day after end 00:00) day          N      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `all` is the dashboard's "All Time" button. It has always meant the
//! trailing twelve calendar months and is kept as that finite window.
//!
//! ## Local Time
//! `now` is an already-zoned wall-clock instant. Nothing here converts
//! between zones, so every boundary is a local midnight.

use chrono::{Datelike, Days, Duration, Months, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{de, Deserialize, Deserializer, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::timestamp::parse_order_timestamp;
use crate::{ALL_WINDOW_MONTHS, YEAR_WINDOW_YEARS};

// =============================================================================
// Granularity
// =============================================================================

/// Size of a single bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum Granularity {
    Hour,
    Day,
    Month,
    Year,
}

impl std::fmt::Display for Granularity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Granularity::Hour => write!(f, "hour"),
            Granularity::Day => write!(f, "day"),
            Granularity::Month => write!(f, "month"),
            Granularity::Year => write!(f, "year"),
        }
    }
}

// =============================================================================
// Range Selection
// =============================================================================

/// What the user picked in the dashboard header.
///
/// ## JSON Shape
/// ```json
/// { "kind": "month", "anchor": "2025-01-01" }
/// { "kind": "custom", "customStart": "2025-01-01T00:00:00", "customEnd": "2025-01-31T00:00:00" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "kind", rename_all = "lowercase")]
#[ts(export)]
pub enum RangeSelection {
    Day,
    Month {
        /// Any date inside the month to show. Defaults to `now`'s month.
        #[serde(default)]
        #[ts(as = "Option<String>")]
        anchor: Option<NaiveDate>,
    },
    Year,
    All,
    /// Bounds accept the date picker's bare `YYYY-MM-DD` as well as full
    /// date-times.
    Custom {
        #[serde(default, rename = "customStart", deserialize_with = "picker_datetime")]
        #[ts(as = "Option<String>")]
        custom_start: Option<NaiveDateTime>,
        #[serde(default, rename = "customEnd", deserialize_with = "picker_datetime")]
        #[ts(as = "Option<String>")]
        custom_end: Option<NaiveDateTime>,
    },
}

impl RangeSelection {
    /// Month selection anchored on `anchor`.
    pub fn month_of(anchor: NaiveDate) -> Self {
        RangeSelection::Month {
            anchor: Some(anchor),
        }
    }

    /// Custom selection covering the whole days `start..=end`.
    pub fn custom(start: NaiveDate, end: NaiveDate) -> Self {
        RangeSelection::Custom {
            custom_start: Some(start.and_time(NaiveTime::MIN)),
            custom_end: Some(end.and_time(NaiveTime::MIN)),
        }
    }

    /// The selection tag as it appears on the wire.
    pub fn kind(&self) -> &'static str {
        match self {
            RangeSelection::Day => "day",
            RangeSelection::Month { .. } => "month",
            RangeSelection::Year => "year",
            RangeSelection::All => "all",
            RangeSelection::Custom { .. } => "custom",
        }
    }
}

fn picker_datetime<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        None => Ok(None),
        Some(raw) => parse_order_timestamp(&raw)
            .map(Some)
            .ok_or_else(|| de::Error::custom(format!("invalid custom range bound: {raw:?}"))),
    }
}

// =============================================================================
// Quick Select
// =============================================================================

/// Shortcut buttons of the custom date picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum QuickSelect {
    #[serde(rename = "yesterday")]
    Yesterday,
    #[serde(rename = "last7days")]
    Last7Days,
    #[serde(rename = "last30days")]
    Last30Days,
    #[serde(rename = "lastyear")]
    LastYear,
}

impl QuickSelect {
    /// Inclusive `(first_day, last_day)` relative to `today`.
    ///
    /// ## Example
    /// ```rust
    /// use chrono::NaiveDate;
    /// use insight_core::range::QuickSelect;
    ///
    /// let today = NaiveDate::from_ymd_opt(2025, 3, 15).unwrap();
    /// let (start, end) = QuickSelect::LastYear.bounds(today).unwrap();
    /// assert_eq!(start, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
    /// assert_eq!(end, NaiveDate::from_ymd_opt(2024, 12, 31).unwrap());
    /// ```
    pub fn bounds(self, today: NaiveDate) -> CoreResult<(NaiveDate, NaiveDate)> {
        match self {
            QuickSelect::Yesterday => {
                let yesterday = days_before(today, 1)?;
                Ok((yesterday, yesterday))
            }
            QuickSelect::Last7Days => Ok((days_before(today, 7)?, today)),
            QuickSelect::Last30Days => Ok((days_before(today, 30)?, today)),
            QuickSelect::LastYear => {
                let year = today.year() - 1;
                Ok((ymd(year, 1, 1)?, ymd(year, 12, 31)?))
            }
        }
    }

    /// Converts the shortcut into a custom selection.
    pub fn selection(self, now: NaiveDateTime) -> CoreResult<RangeSelection> {
        let (start, end) = self.bounds(now.date())?;
        Ok(RangeSelection::custom(start, end))
    }
}

impl std::str::FromStr for QuickSelect {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "yesterday" => Ok(QuickSelect::Yesterday),
            "last7days" | "last_7_days" => Ok(QuickSelect::Last7Days),
            "last30days" | "last_30_days" => Ok(QuickSelect::Last30Days),
            "lastyear" | "last_year" => Ok(QuickSelect::LastYear),
            _ => Err(ValidationError::NotAllowed {
                field: "quick_select".to_string(),
                allowed: vec![
                    "yesterday".to_string(),
                    "last7days".to_string(),
                    "last30days".to_string(),
                    "lastyear".to_string(),
                ],
            }
            .into()),
        }
    }
}

// =============================================================================
// Resolved Range
// =============================================================================

/// A concrete half-open interval `[start, end)` plus its bucket size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ResolvedRange {
    #[ts(as = "String")]
    pub start: NaiveDateTime,
    /// Exclusive upper bound.
    #[ts(as = "String")]
    pub end: NaiveDateTime,
    pub granularity: Granularity,
}

impl ResolvedRange {
    /// Returns true if `ts` falls in `[start, end)`.
    #[inline]
    pub fn contains(&self, ts: NaiveDateTime) -> bool {
        ts >= self.start && ts < self.end
    }

    /// Last calendar day covered by the range.
    pub fn last_day(&self) -> NaiveDate {
        let last_instant = self.end - Duration::nanoseconds(1);
        last_instant.date().max(self.start.date())
    }

    /// Length of the interval.
    pub fn span(&self) -> Duration {
        self.end - self.start
    }

    /// Number of buckets the scaffold for this range will hold.
    pub fn bucket_count(&self) -> usize {
        let (start, last) = (self.start, self.last_day());
        let count = match self.granularity {
            Granularity::Hour => (self.span().num_seconds() + 3599) / 3600,
            Granularity::Day => (last - start.date()).num_days() + 1,
            Granularity::Month => {
                i64::from(month_ordinal(last) - month_ordinal(start.date())) + 1
            }
            Granularity::Year => i64::from(last.year() - start.year()) + 1,
        };
        usize::try_from(count).unwrap_or(0)
    }

    /// The window of equal length that ends where this one starts.
    ///
    /// Used for period-over-period comparisons. Hour and day ranges shift by
    /// duration, so a preceding "month" is exactly as many days long as this
    /// one. Month and year ranges shift by whole calendar months, so the
    /// preceding window starts on a calendar boundary too.
    pub fn preceding(&self) -> CoreResult<ResolvedRange> {
        let start = match self.granularity {
            Granularity::Hour | Granularity::Day => self.start.checked_sub_signed(self.span()),
            Granularity::Month | Granularity::Year => {
                let months = month_ordinal(self.end.date()) - month_ordinal(self.start.date());
                u32::try_from(months)
                    .ok()
                    .and_then(|months| self.start.checked_sub_months(Months::new(months)))
            }
        }
        .ok_or_else(|| CoreError::invalid_range("preceding window is out of range"))?;
        Ok(ResolvedRange {
            start,
            end: self.start,
            granularity: self.granularity,
        })
    }
}

// =============================================================================
// Resolution
// =============================================================================

/// Resolves a selection against the caller-supplied `now`.
///
/// ## Errors
/// `CoreError::InvalidRange` when a custom selection is missing a bound or
/// its start is after its end. Bounds are never swapped silently.
///
/// ## Example
/// ```rust
/// use chrono::NaiveDate;
/// use insight_core::range::{resolve, Granularity, RangeSelection};
///
/// let now = NaiveDate::from_ymd_opt(2025, 2, 10).unwrap().and_hms_opt(14, 0, 0).unwrap();
/// let range = resolve(&RangeSelection::Month { anchor: None }, now).unwrap();
///
/// assert_eq!(range.granularity, Granularity::Day);
/// assert_eq!(range.bucket_count(), 28);
/// ```
pub fn resolve(selection: &RangeSelection, now: NaiveDateTime) -> CoreResult<ResolvedRange> {
    let today = now.date();

    let (start, end, granularity) = match selection {
        RangeSelection::Day => {
            let start = midnight(today);
            (start, start + Duration::hours(24), Granularity::Hour)
        }
        RangeSelection::Month { anchor } => {
            let first = first_of_month(anchor.unwrap_or(today))?;
            (midnight(first), midnight(add_months(first, 1)?), Granularity::Day)
        }
        RangeSelection::Year => {
            let first = ymd(today.year() - (YEAR_WINDOW_YEARS - 1), 1, 1)?;
            let next = ymd(today.year() + 1, 1, 1)?;
            (midnight(first), midnight(next), Granularity::Year)
        }
        RangeSelection::All => {
            let current = first_of_month(today)?;
            let first = current
                .checked_sub_months(Months::new(ALL_WINDOW_MONTHS - 1))
                .ok_or_else(|| CoreError::invalid_range("trailing window is out of range"))?;
            (midnight(first), midnight(add_months(current, 1)?), Granularity::Month)
        }
        RangeSelection::Custom {
            custom_start,
            custom_end,
        } => {
            let start =
                custom_start.ok_or_else(|| CoreError::invalid_range("custom range requires a start date"))?;
            let end =
                custom_end.ok_or_else(|| CoreError::invalid_range("custom range requires an end date"))?;
            if start > end {
                return Err(CoreError::invalid_range(format!(
                    "start {start} is after end {end}"
                )));
            }
            let after_last = end
                .date()
                .succ_opt()
                .ok_or_else(|| CoreError::invalid_range("end date is out of range"))?;
            (midnight(start.date()), midnight(after_last), Granularity::Day)
        }
    };

    Ok(ResolvedRange {
        start,
        end,
        granularity,
    })
}

// =============================================================================
// Calendar Helpers
// =============================================================================

#[inline]
pub(crate) fn midnight(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

/// Months since year 0, for integer month arithmetic.
#[inline]
pub(crate) fn month_ordinal(date: NaiveDate) -> i32 {
    date.year() * 12 + date.month0() as i32
}

fn ymd(year: i32, month: u32, day: u32) -> CoreResult<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| CoreError::invalid_range(format!("{year}-{month:02}-{day:02} is not a valid date")))
}

fn first_of_month(date: NaiveDate) -> CoreResult<NaiveDate> {
    ymd(date.year(), date.month(), 1)
}

fn add_months(date: NaiveDate, months: u32) -> CoreResult<NaiveDate> {
    date.checked_add_months(Months::new(months))
        .ok_or_else(|| CoreError::invalid_range("month arithmetic is out of range"))
}

fn days_before(date: NaiveDate, days: u64) -> CoreResult<NaiveDate> {
    date.checked_sub_days(Days::new(days))
        .ok_or_else(|| CoreError::invalid_range("date arithmetic is out of range"))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        date(y, m, d).and_hms_opt(h, min, 0).unwrap()
    }

    #[test]
    fn test_day_range_is_today_midnight_to_midnight() {
        let range = resolve(&RangeSelection::Day, at(2025, 3, 9, 17, 45)).unwrap();
        assert_eq!(range.start, at(2025, 3, 9, 0, 0));
        assert_eq!(range.end, at(2025, 3, 10, 0, 0));
        assert_eq!(range.granularity, Granularity::Hour);
        assert_eq!(range.bucket_count(), 24);
    }

    #[test]
    fn test_month_range_uses_anchor() {
        let selection = RangeSelection::month_of(date(2025, 1, 17));
        let range = resolve(&selection, at(2025, 6, 1, 9, 0)).unwrap();
        assert_eq!(range.start, at(2025, 1, 1, 0, 0));
        assert_eq!(range.end, at(2025, 2, 1, 0, 0));
        assert_eq!(range.bucket_count(), 31);
    }

    #[test]
    fn test_month_range_defaults_to_now() {
        let range = resolve(&RangeSelection::Month { anchor: None }, at(2024, 2, 20, 8, 0)).unwrap();
        assert_eq!(range.start, at(2024, 2, 1, 0, 0));
        assert_eq!(range.end, at(2024, 3, 1, 0, 0));
        assert_eq!(range.bucket_count(), 29); // leap year
    }

    #[test]
    fn test_december_month_rolls_into_next_year() {
        let range = resolve(&RangeSelection::month_of(date(2024, 12, 5)), at(2025, 1, 1, 0, 0)).unwrap();
        assert_eq!(range.end, at(2025, 1, 1, 0, 0));
    }

    #[test]
    fn test_year_range_is_five_years() {
        let range = resolve(&RangeSelection::Year, at(2025, 7, 4, 12, 0)).unwrap();
        assert_eq!(range.start, at(2021, 1, 1, 0, 0));
        assert_eq!(range.end, at(2026, 1, 1, 0, 0));
        assert_eq!(range.granularity, Granularity::Year);
        assert_eq!(range.bucket_count(), 5);
    }

    #[test]
    fn test_all_range_is_trailing_twelve_months() {
        let range = resolve(&RangeSelection::All, at(2025, 3, 15, 12, 0)).unwrap();
        assert_eq!(range.start, at(2024, 4, 1, 0, 0));
        assert_eq!(range.end, at(2025, 4, 1, 0, 0));
        assert_eq!(range.granularity, Granularity::Month);
        assert_eq!(range.bucket_count(), 12);
    }

    #[test]
    fn test_custom_range_includes_whole_end_day() {
        let selection = RangeSelection::Custom {
            custom_start: Some(at(2025, 1, 10, 15, 30)),
            custom_end: Some(at(2025, 1, 12, 0, 0)),
        };
        let range = resolve(&selection, at(2025, 6, 1, 0, 0)).unwrap();
        assert_eq!(range.start, at(2025, 1, 10, 0, 0));
        assert_eq!(range.end, at(2025, 1, 13, 0, 0));
        assert_eq!(range.last_day(), date(2025, 1, 12));
        assert_eq!(range.bucket_count(), 3);
    }

    #[test]
    fn test_custom_single_day() {
        let range = resolve(&RangeSelection::custom(date(2025, 5, 1), date(2025, 5, 1)), at(2025, 6, 1, 0, 0))
            .unwrap();
        assert_eq!(range.bucket_count(), 1);
    }

    #[test]
    fn test_custom_missing_bounds_fail() {
        let now = at(2025, 6, 1, 0, 0);
        let missing_start = RangeSelection::Custom {
            custom_start: None,
            custom_end: Some(now),
        };
        let missing_end = RangeSelection::Custom {
            custom_start: Some(now),
            custom_end: None,
        };
        assert!(matches!(resolve(&missing_start, now), Err(CoreError::InvalidRange { .. })));
        assert!(matches!(resolve(&missing_end, now), Err(CoreError::InvalidRange { .. })));
    }

    #[test]
    fn test_custom_inverted_bounds_fail_without_swapping() {
        let selection = RangeSelection::custom(date(2025, 3, 10), date(2025, 3, 1));
        let err = resolve(&selection, at(2025, 6, 1, 0, 0)).unwrap_err();
        assert!(matches!(err, CoreError::InvalidRange { .. }));
        assert!(err.to_string().contains("after end"));
    }

    #[test]
    fn test_quick_select_bounds() {
        let today = date(2025, 3, 15);
        assert_eq!(
            QuickSelect::Yesterday.bounds(today).unwrap(),
            (date(2025, 3, 14), date(2025, 3, 14))
        );
        assert_eq!(
            QuickSelect::Last7Days.bounds(today).unwrap(),
            (date(2025, 3, 8), today)
        );
        assert_eq!(
            QuickSelect::Last30Days.bounds(today).unwrap(),
            (date(2025, 2, 13), today)
        );
        assert_eq!(
            QuickSelect::LastYear.bounds(today).unwrap(),
            (date(2024, 1, 1), date(2024, 12, 31))
        );
    }

    #[test]
    fn test_quick_select_resolves_as_custom() {
        let now = at(2025, 3, 15, 11, 0);
        let selection = QuickSelect::Last7Days.selection(now).unwrap();
        assert_eq!(selection.kind(), "custom");

        let range = resolve(&selection, now).unwrap();
        assert_eq!(range.start, at(2025, 3, 8, 0, 0));
        assert_eq!(range.end, at(2025, 3, 16, 0, 0));
        assert_eq!(range.bucket_count(), 8);
    }

    #[test]
    fn test_quick_select_parsing() {
        assert_eq!("last7days".parse::<QuickSelect>().unwrap(), QuickSelect::Last7Days);
        assert_eq!("LastYear".parse::<QuickSelect>().unwrap(), QuickSelect::LastYear);
        assert!("tomorrow".parse::<QuickSelect>().is_err());
    }

    #[test]
    fn test_selection_json_shape() {
        let json = r#"{ "kind": "custom", "customStart": "2025-01-01T00:00:00", "customEnd": "2025-01-31T00:00:00" }"#;
        let selection: RangeSelection = serde_json::from_str(json).unwrap();
        assert_eq!(selection, RangeSelection::custom(date(2025, 1, 1), date(2025, 1, 31)));

        let month: RangeSelection = serde_json::from_str(r#"{ "kind": "month" }"#).unwrap();
        assert_eq!(month, RangeSelection::Month { anchor: None });
    }

    #[test]
    fn test_custom_selection_accepts_picker_dates() {
        let json = r#"{ "kind": "custom", "customStart": "2025-01-01", "customEnd": "2025-01-31" }"#;
        let selection: RangeSelection = serde_json::from_str(json).unwrap();
        assert_eq!(selection, RangeSelection::custom(date(2025, 1, 1), date(2025, 1, 31)));
        assert_eq!(resolve(&selection, at(2025, 6, 1, 0, 0)).unwrap().bucket_count(), 31);

        let open: RangeSelection =
            serde_json::from_str(r#"{ "kind": "custom", "customStart": null }"#).unwrap();
        assert_eq!(
            open,
            RangeSelection::Custom {
                custom_start: None,
                custom_end: None
            }
        );

        let garbage = r#"{ "kind": "custom", "customStart": "someday", "customEnd": "2025-01-31" }"#;
        assert!(serde_json::from_str::<RangeSelection>(garbage).is_err());
    }

    #[test]
    fn test_preceding_window() {
        let range = resolve(&RangeSelection::Day, at(2025, 3, 9, 10, 0)).unwrap();
        let previous = range.preceding().unwrap();
        assert_eq!(previous.start, at(2025, 3, 8, 0, 0));
        assert_eq!(previous.end, range.start);

        let february = resolve(&RangeSelection::Month { anchor: None }, at(2025, 2, 9, 10, 0)).unwrap();
        let previous = february.preceding().unwrap();
        assert_eq!(previous.start, at(2025, 1, 4, 0, 0));
        assert_eq!(previous.end, february.start);
    }

    #[test]
    fn test_preceding_month_and_year_windows_stay_on_calendar_boundaries() {
        let now = at(2025, 3, 15, 12, 0);

        let all = resolve(&RangeSelection::All, now).unwrap();
        let previous = all.preceding().unwrap();
        assert_eq!(previous.start, at(2023, 4, 1, 0, 0));
        assert_eq!(previous.end, at(2024, 4, 1, 0, 0));
        assert_eq!(previous.granularity, Granularity::Month);
        assert_eq!(previous.bucket_count(), 12);

        let year = resolve(&RangeSelection::Year, now).unwrap();
        let previous = year.preceding().unwrap();
        assert_eq!(previous.start, at(2016, 1, 1, 0, 0));
        assert_eq!(previous.end, at(2021, 1, 1, 0, 0));
        assert_eq!(previous.bucket_count(), 5);
    }
}
