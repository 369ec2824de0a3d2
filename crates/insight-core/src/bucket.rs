//! # Bucket Module
//!
//! Fixed-cardinality, zero-filled time series.
//!
//! ## Scaffold First, Records Second
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ResolvedRange [Jan 1, Feb 1) by day                                    │
//! │      │                                                                  │
//! │      ▼                                                                  │
//! │  scaffold()  ──►  [ "1" | "2" | "3" | ... | "31" ]   all zero           │
//! │      │                                                                  │
//! │      ▼                                                                  │
//! │  bucketize(orders)                                                      │
//! │      │   Jan 5 10:00 ──► index 4   (count += 1)                         │
//! │      │   Feb 1 00:00 ──► None      (outside [start, end), dropped)      │
//! │      ▼                                                                  │
//! │  [ 0 | 0 | 0 | 0 | 1 | ... | 0 ]   still 31 buckets                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - Buckets are chronological, contiguous and non-overlapping
//! - The first bucket starts at `range.start`, the last ends at `range.end`
//! - A bucket exists even when nothing falls into it
//! - A record lands in at most one bucket, the one whose bounds hold it.
//!   Indexes come from integer calendar arithmetic, never from comparing
//!   formatted strings
//!
//! Bucketing is status-agnostic. Revenue sums are added separately by
//! [`crate::category::aggregate`], so one pass yields both "all orders per
//! day" and "revenue per day".

use std::collections::BTreeMap;

use chrono::{Datelike, Duration, Months, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::range::{month_ordinal, Granularity, ResolvedRange};
use crate::types::{Order, OrderStatus};

// =============================================================================
// Aggregates
// =============================================================================

/// Running totals for one bucket.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Aggregates {
    /// Every order placed in the bucket, whatever its status.
    pub count: u32,
    /// Orders currently `Delivered`.
    pub delivered: u32,
    /// Orders currently `Cancelled`.
    pub cancelled: u32,
    /// Revenue-eligible orders that contributed to `sum`.
    pub revenue_orders: u32,
    /// Revenue from eligible orders.
    pub sum: f64,
    /// Revenue split by resolved category.
    pub by_category: BTreeMap<String, f64>,
}

// =============================================================================
// Bucket
// =============================================================================

/// One time slice of a series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Bucket {
    pub label: String,
    #[ts(as = "String")]
    pub range_start: NaiveDateTime,
    /// Exclusive.
    #[ts(as = "String")]
    pub range_end: NaiveDateTime,
    pub aggregates: Aggregates,
}

impl Bucket {
    fn empty(label: String, range_start: NaiveDateTime, range_end: NaiveDateTime) -> Self {
        Bucket {
            label,
            range_start,
            range_end,
            aggregates: Aggregates::default(),
        }
    }

    /// Returns true if `ts` falls in `[range_start, range_end)`.
    #[inline]
    pub fn contains(&self, ts: NaiveDateTime) -> bool {
        ts >= self.range_start && ts < self.range_end
    }
}

// =============================================================================
// Bucket Series
// =============================================================================

/// The ordered buckets tiling a [`ResolvedRange`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct BucketSeries {
    pub range: ResolvedRange,
    pub buckets: Vec<Bucket>,
}

impl BucketSeries {
    /// Builds the zero-filled scaffold for `range`.
    ///
    /// ## Labels
    /// | Granularity | Label                                              |
    /// |-------------|----------------------------------------------------|
    /// | Hour        | `"0:00"` .. `"23:00"`                              |
    /// | Day         | `"1"` .. `"31"`, or `"Jan 5"` when crossing months |
    /// | Month       | `"Jan"` .. `"Dec"`                                 |
    /// | Year        | `"2025"`                                           |
    pub fn scaffold(range: &ResolvedRange) -> Self {
        let single_month = month_ordinal(range.start.date()) == month_ordinal(range.last_day());
        let mut buckets = Vec::with_capacity(range.bucket_count());

        let mut cursor = range.start;
        while cursor < range.end {
            let next = step(cursor, range.granularity)
                .unwrap_or(range.end)
                .min(range.end);
            let label = label_for(cursor, range.granularity, single_month);
            buckets.push(Bucket::empty(label, cursor, next));
            cursor = next;
        }

        BucketSeries {
            range: *range,
            buckets,
        }
    }

    /// Index of the bucket holding `ts`, or `None` when `ts` is outside
    /// `[start, end)`.
    pub fn index_of(&self, ts: NaiveDateTime) -> Option<usize> {
        if !self.range.contains(ts) {
            return None;
        }

        let start = self.range.start;
        let offset = match self.range.granularity {
            Granularity::Hour => (ts - start).num_hours(),
            Granularity::Day => (ts.date() - start.date()).num_days(),
            Granularity::Month => i64::from(month_ordinal(ts.date()) - month_ordinal(start.date())),
            Granularity::Year => i64::from(ts.year() - start.year()),
        };

        let guess = usize::try_from(offset)
            .ok()
            .filter(|index| *index < self.buckets.len());
        if let Some(index) = guess {
            if self.buckets[index].contains(ts) {
                return Some(index);
            }
        }

        // Range not aligned to calendar units: find the bucket by its bounds.
        let index = self.buckets.partition_point(|bucket| bucket.range_end <= ts);
        self.buckets
            .get(index)
            .filter(|bucket| bucket.contains(ts))
            .map(|_| index)
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn buckets(&self) -> &[Bucket] {
        &self.buckets
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.buckets.iter().map(|b| b.label.as_str())
    }

    /// Orders counted across all buckets.
    pub fn total_count(&self) -> u32 {
        self.buckets.iter().map(|b| b.aggregates.count).sum()
    }

    /// Revenue-eligible orders across all buckets.
    pub fn total_revenue_orders(&self) -> u32 {
        self.buckets.iter().map(|b| b.aggregates.revenue_orders).sum()
    }

    /// Revenue across all buckets.
    pub fn total_sum(&self) -> f64 {
        self.buckets.iter().map(|b| b.aggregates.sum).sum()
    }

    pub(crate) fn bucket_mut(&mut self, index: usize) -> Option<&mut Bucket> {
        self.buckets.get_mut(index)
    }
}

// =============================================================================
// Bucketize
// =============================================================================

/// Builds the scaffold for `range` and counts each in-range order into it.
///
/// Out-of-range orders are skipped on purpose; they are not an error.
///
/// ## Example
/// ```rust
/// use chrono::NaiveDate;
/// use insight_core::bucket::bucketize;
/// use insight_core::range::{resolve, RangeSelection};
/// use insight_core::types::{Order, OrderStatus};
///
/// let now = NaiveDate::from_ymd_opt(2025, 1, 20).unwrap().and_hms_opt(9, 0, 0).unwrap();
/// let range = resolve(&RangeSelection::Day, now).unwrap();
/// let orders = vec![Order::new("a", 10.0, OrderStatus::Pending, now)];
///
/// let series = bucketize(&orders, &range);
/// assert_eq!(series.len(), 24);
/// assert_eq!(series.buckets()[9].aggregates.count, 1);
/// ```
pub fn bucketize<'a, I>(records: I, range: &ResolvedRange) -> BucketSeries
where
    I: IntoIterator<Item = &'a Order>,
{
    let mut series = BucketSeries::scaffold(range);

    for order in records {
        let Some(index) = series.index_of(order.created_at) else {
            continue;
        };
        if let Some(bucket) = series.bucket_mut(index) {
            let aggregates = &mut bucket.aggregates;
            aggregates.count += 1;
            match order.status {
                OrderStatus::Delivered => aggregates.delivered += 1,
                OrderStatus::Cancelled => aggregates.cancelled += 1,
                _ => {}
            }
        }
    }

    series
}

// =============================================================================
// Helpers
// =============================================================================

fn step(cursor: NaiveDateTime, granularity: Granularity) -> Option<NaiveDateTime> {
    match granularity {
        Granularity::Hour => cursor.checked_add_signed(Duration::hours(1)),
        Granularity::Day => cursor.checked_add_signed(Duration::days(1)),
        Granularity::Month => cursor.checked_add_months(Months::new(1)),
        Granularity::Year => cursor.checked_add_months(Months::new(12)),
    }
}

fn label_for(cursor: NaiveDateTime, granularity: Granularity, single_month: bool) -> String {
    match granularity {
        Granularity::Hour => format!("{}:00", cursor.hour()),
        Granularity::Day if single_month => cursor.day().to_string(),
        Granularity::Day => cursor.format("%b %-d").to_string(),
        Granularity::Month => cursor.format("%b").to_string(),
        Granularity::Year => cursor.year().to_string(),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
