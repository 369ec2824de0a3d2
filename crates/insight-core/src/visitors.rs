//! # Visitors Module
//!
//! Visitor counters and the page-view chart, laid over the same scaffold as
//! the order charts.
//!
//! ## Reconciliation
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  online_now ─────────────────────────────────────► gauge (as given)     │
//! │  today samples ──── Σ visitors ──────────────────► today_visitors       │
//! │  total samples ──── Σ visitors, Σ page_views ────► totals               │
//! │  chart samples ──── index_of(recorded_at) ───────► series[i] += sample  │
//! │                                                        ▲                │
//! │  BucketSeries scaffold ──── labels, one point each ────┘                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The series always has exactly one point per scaffold bucket. Samples
//! outside the range are dropped, and missing buckets stay at zero.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::bucket::BucketSeries;
use crate::money::round_half_up;
use crate::types::{DeviceKind, VisitorSample};

// =============================================================================
// Device Classification
// =============================================================================

const TABLET_MARKERS: &[&str] = &["tablet", "ipad", "playbook", "silk"];

const MOBILE_MARKERS: &[&str] = &[
    "mobile",
    "iphone",
    "ipod",
    "android",
    "blackberry",
    "opera mini",
    "iemobile",
];

impl DeviceKind {
    /// Classifies a browser user-agent string.
    ///
    /// Tablet markers are checked first, so an Android tablet reporting
    /// `"Tablet"` is not counted as a phone.
    ///
    /// ## Example
    /// ```rust
    /// use insight_core::types::DeviceKind;
    ///
    /// let ipad = "Mozilla/5.0 (iPad; CPU OS 17_0 like Mac OS X)";
    /// assert_eq!(DeviceKind::from_user_agent(ipad), DeviceKind::Tablet);
    /// assert_eq!(DeviceKind::from_user_agent("curl/8.5.0"), DeviceKind::Desktop);
    /// ```
    pub fn from_user_agent(user_agent: &str) -> Self {
        let ua = user_agent.to_lowercase();
        let has_any = |markers: &[&str]| markers.iter().any(|m| ua.contains(m));

        if has_any(TABLET_MARKERS) {
            DeviceKind::Tablet
        } else if has_any(MOBILE_MARKERS) {
            DeviceKind::Mobile
        } else {
            DeviceKind::Desktop
        }
    }
}

// =============================================================================
// View Types
// =============================================================================

/// One point of the page-view chart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct VisitorPoint {
    pub label: String,
    pub page_views: u32,
    pub visitors: u32,
    /// Page views from phones.
    pub mobile: u32,
    /// Page views from tablets.
    pub tablet: u32,
    /// Page views from desktops and unknown devices.
    pub desktop: u32,
}

impl VisitorPoint {
    fn add(&mut self, sample: &VisitorSample) {
        self.page_views = self.page_views.saturating_add(sample.page_views);
        self.visitors = self.visitors.saturating_add(sample.visitors);

        let device = match sample.device.unwrap_or_default() {
            DeviceKind::Mobile => &mut self.mobile,
            DeviceKind::Tablet => &mut self.tablet,
            DeviceKind::Desktop => &mut self.desktop,
        };
        *device = device.saturating_add(sample.page_views);
    }
}

/// Everything the visitor widgets show.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct VisitorStatsView {
    pub online_now: u32,
    pub today_visitors: u32,
    pub total_visitors: u32,
    pub total_page_views: u32,
    pub series: Vec<VisitorPoint>,
}

// =============================================================================
// Reconcile
// =============================================================================

/// Merges the visitor feeds into one view shaped like `scaffold`.
///
/// `today_samples` and `total_samples` are summed as given; the caller
/// decides what "today" and "total" cover. Only `chart_series` is bucketed.
pub fn reconcile(
    online_now: u32,
    today_samples: &[VisitorSample],
    total_samples: &[VisitorSample],
    chart_series: &[VisitorSample],
    scaffold: &BucketSeries,
) -> VisitorStatsView {
    let mut series: Vec<VisitorPoint> = scaffold
        .labels()
        .map(|label| VisitorPoint {
            label: label.to_string(),
            ..VisitorPoint::default()
        })
        .collect();

    for sample in chart_series {
        if let Some(point) = scaffold
            .index_of(sample.recorded_at)
            .and_then(|position| series.get_mut(position))
        {
            point.add(sample);
        }
    }

    VisitorStatsView {
        online_now,
        today_visitors: sum_by(today_samples, |s| s.visitors),
        total_visitors: sum_by(total_samples, |s| s.visitors),
        total_page_views: sum_by(total_samples, |s| s.page_views),
        series,
    }
}

fn sum_by(samples: &[VisitorSample], field: impl Fn(&VisitorSample) -> u32) -> u32 {
    samples
        .iter()
        .fold(0u32, |acc, sample| acc.saturating_add(field(sample)))
}

// =============================================================================
// Period Comparison
// =============================================================================

/// Whole-number percent change from `previous` to `current`, as shown on the
/// stat cards (`"50"`, `"-20"`).
///
/// With no previous value the change reads `"100"` if anything happened
/// now and `"0"` otherwise.
///
/// ## Example
/// ```rust
/// use insight_core::visitors::period_over_period;
///
/// assert_eq!(period_over_period(150.0, 100.0), "50");
/// assert_eq!(period_over_period(5.0, 0.0), "100");
/// assert_eq!(period_over_period(0.0, 0.0), "0");
/// ```
pub fn period_over_period(current: f64, previous: f64) -> String {
    if previous <= 0.0 {
        return if current > 0.0 { "100" } else { "0" }.to_string();
    }

    let percent = round_half_up((current - previous) / previous * 100.0);
    // `as` maps NaN to 0 and saturates; it also folds -0.0 into 0.
    (percent as i64).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bucket::bucketize;
    use crate::range::{resolve, RangeSelection};
    use crate::types::Order;
    use chrono::{NaiveDate, NaiveDateTime};

    fn at(d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 1, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    fn day_scaffold() -> BucketSeries {
        let range = resolve(&RangeSelection::Day, at(10, 12)).unwrap();
        BucketSeries::scaffold(&range)
    }

    #[test]
    fn test_user_agent_classification() {
        let cases = [
            ("Mozilla/5.0 (iPhone; CPU iPhone OS 17_0)", DeviceKind::Mobile),
            ("Mozilla/5.0 (Linux; Android 14; Pixel 8) Mobile", DeviceKind::Mobile),
            ("Opera/9.80 (J2ME/MIDP; Opera Mini/9.80)", DeviceKind::Mobile),
            ("Mozilla/5.0 (Linux; Android 13; SM-X700) Tablet", DeviceKind::Tablet),
            ("Mozilla/5.0 (Linux; U; Android 4.0.3; KFTT) Silk/3.68", DeviceKind::Tablet),
            ("Mozilla/5.0 (Windows NT 10.0; Win64; x64)", DeviceKind::Desktop),
            ("", DeviceKind::Desktop),
        ];
        for (ua, expected) in cases {
            assert_eq!(DeviceKind::from_user_agent(ua), expected, "{ua}");
        }
    }

    #[test]
    fn test_empty_chart_is_zero_filled() {
        let scaffold = day_scaffold();
        let view = reconcile(3, &[], &[], &[], &scaffold);

        assert_eq!(view.online_now, 3);
        assert_eq!(view.series.len(), 24);
        assert_eq!(view.series[0].label, "0:00");
        assert_eq!(view.series[23].label, "23:00");
        assert!(view.series.iter().all(|p| p.page_views == 0 && p.visitors == 0));
    }

    #[test]
    fn test_zero_fill_matches_order_series_shape() {
        let range = resolve(&RangeSelection::month_of(at(1, 0).date()), at(15, 0)).unwrap();
        let orders = vec![Order::new(
            "a",
            1.0,
            crate::types::OrderStatus::Pending,
            at(3, 0),
        )];
        let order_series = bucketize(&orders, &range);
        let samples = vec![VisitorSample::new(at(9, 8), 4, 2)];

        let view = reconcile(0, &[], &[], &samples, &order_series);
        let labels: Vec<&str> = view.series.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, order_series.labels().collect::<Vec<_>>());
        assert_eq!(view.series[8].page_views, 4);
    }

    #[test]
    fn test_empty_and_filled_charts_share_labels_point_by_point() {
        let selections = [
            RangeSelection::Day,
            RangeSelection::month_of(at(1, 0).date()),
            RangeSelection::Year,
            RangeSelection::All,
        ];
        let samples = vec![
            VisitorSample::new(at(2, 6), 5, 3),
            VisitorSample::new(at(10, 9), 2, 1).with_device(DeviceKind::Mobile),
            VisitorSample::new(at(31, 23), 1, 1),
        ];

        for selection in selections {
            let scaffold = BucketSeries::scaffold(&resolve(&selection, at(10, 12)).unwrap());
            let empty = reconcile(0, &[], &[], &[], &scaffold);
            let filled = reconcile(0, &[], &[], &samples, &scaffold);

            assert_eq!(empty.series.len(), scaffold.len(), "{}", selection.kind());
            assert_eq!(empty.series.len(), filled.series.len(), "{}", selection.kind());
            for (blank, point) in empty.series.iter().zip(&filled.series) {
                assert_eq!(blank.label, point.label);
                assert_eq!(blank.page_views, 0);
            }
        }
    }

    #[test]
    fn test_chart_samples_are_bucketed_by_device() {
        let scaffold = day_scaffold();
        let chart = vec![
            VisitorSample::new(at(10, 9), 10, 4).with_device(DeviceKind::Mobile),
            VisitorSample::new(at(10, 9), 6, 3).with_device(DeviceKind::Tablet),
            VisitorSample::new(at(10, 9), 5, 1),
            VisitorSample::new(at(10, 23), 1, 1).with_device(DeviceKind::Desktop),
            // Outside the day, dropped.
            VisitorSample::new(at(11, 0), 99, 99),
        ];

        let view = reconcile(0, &[], &[], &chart, &scaffold);
        let nine = &view.series[9];
        assert_eq!(nine.page_views, 21);
        assert_eq!(nine.visitors, 8);
        assert_eq!((nine.mobile, nine.tablet, nine.desktop), (10, 6, 5));
        assert_eq!(view.series[23].desktop, 1);
        assert_eq!(view.series.iter().map(|p| p.page_views).sum::<u32>(), 22);
    }

    #[test]
    fn test_counters_sum_their_own_feeds() {
        let scaffold = day_scaffold();
        let today = vec![VisitorSample::new(at(10, 1), 3, 2), VisitorSample::new(at(10, 2), 1, 1)];
        let total = vec![
            VisitorSample::new(at(1, 1), 100, 40),
            VisitorSample::new(at(10, 1), u32::MAX, 1),
        ];

        let view = reconcile(7, &today, &total, &[], &scaffold);
        assert_eq!(view.today_visitors, 3);
        assert_eq!(view.total_visitors, 41);
        assert_eq!(view.total_page_views, u32::MAX);
    }

    #[test]
    fn test_period_over_period() {
        assert_eq!(period_over_period(0.0, 0.0), "0");
        assert_eq!(period_over_period(12.0, 0.0), "100");
        assert_eq!(period_over_period(150.0, 100.0), "50");
        assert_eq!(period_over_period(80.0, 100.0), "-20");
        assert_eq!(period_over_period(0.0, 40.0), "-100");
        assert_eq!(period_over_period(1.0, 3.0), "-67");
        assert_eq!(period_over_period(100.0, 100.0), "0");
    }
}
