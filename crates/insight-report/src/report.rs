//! # Dashboard Report
//!
//! One call, one consistent report for every dashboard widget.
//!
//! ## Build Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         DashboardBuilder::build                         │
//! │                                                                         │
//! │  RangeSelection + now                                                   │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  resolve() ──► ResolvedRange ──► bucketize() ──► counted scaffold       │
//! │                                       │                 │               │
//! │                                       ▼                 ▼               │
//! │                                 aggregate()        reconcile()          │
//! │                                 (revenue)          (visitors)           │
//! │                                       │                                 │
//! │         category_breakdown() ◄────────┼────────► rank_best_sellers()    │
//! │                                       ▼                                 │
//! │         StatusBreakdown ──► ReportSummary ──► DashboardReport           │
//! │                                                                         │
//! │  build_with_previous() also runs the preceding window for comparison    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every widget reads from the same report, so the revenue chart, the
//! category donut and the summary tiles can never disagree.

use chrono::NaiveDateTime;
use insight_core::bucket::{bucketize, BucketSeries};
use insight_core::category::{aggregate, category_breakdown, CategoryShare, ProductIndex};
use insight_core::range::{resolve, RangeSelection, ResolvedRange};
use insight_core::ranking::{rank_best_sellers, BestSellerEntry};
use insight_core::status::StatusBreakdown;
use insight_core::types::Order;
use insight_core::visitors::{period_over_period, reconcile, VisitorStatsView};
use serde::{Deserialize, Serialize};
use tracing::{debug, info_span, trace};
use ts_rs::TS;

use crate::config::InsightConfig;
use crate::error::ReportResult;
use crate::snapshot::DashboardSnapshot;

// =============================================================================
// Report Types
// =============================================================================

/// Headline numbers for the summary tiles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ReportSummary {
    /// Revenue from eligible orders in the range.
    pub total_revenue: f64,
    /// Every order in the range, whatever its status.
    pub total_orders: u32,
    /// Orders that contributed to `total_revenue`.
    pub revenue_orders: u32,
    /// `total_revenue / revenue_orders`, or 0 with no revenue orders.
    pub average_order_value: f64,
    pub formatted_revenue: String,
    pub formatted_average: String,
}

/// The same figures for the window just before the selected one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PeriodComparison {
    pub previous_range: ResolvedRange,
    pub previous_revenue: f64,
    pub previous_orders: u32,
    /// Whole-number percent, e.g. `"50"` or `"-20"`.
    pub revenue_change: String,
    pub orders_change: String,
}

/// Everything the dashboard draws for one range selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct DashboardReport {
    pub range: ResolvedRange,
    pub series: BucketSeries,
    pub categories: Vec<CategoryShare>,
    pub best_sellers: Vec<BestSellerEntry>,
    pub visitors: VisitorStatsView,
    pub statuses: StatusBreakdown,
    pub summary: ReportSummary,
    pub comparison: Option<PeriodComparison>,
}

impl DashboardReport {
    /// Serializes the report for the web frontend.
    pub fn to_json(&self) -> ReportResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Pretty-printed JSON, for fixtures and debugging.
    pub fn to_json_pretty(&self) -> ReportResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

// =============================================================================
// Builder
// =============================================================================

/// Builds [`DashboardReport`]s with a fixed configuration.
///
/// Holds only immutable settings, so one builder can serve concurrent
/// requests.
#[derive(Debug, Clone, Default)]
pub struct DashboardBuilder {
    config: InsightConfig,
}

impl DashboardBuilder {
    pub fn new(config: InsightConfig) -> Self {
        DashboardBuilder { config }
    }

    pub fn config(&self) -> &InsightConfig {
        &self.config
    }

    /// Builds the report for `selection` as seen at `now`.
    ///
    /// ## Errors
    /// `ReportError::Core(CoreError::InvalidRange)` for a malformed custom
    /// range. Nothing is computed in that case.
    pub fn build(
        &self,
        snapshot: &DashboardSnapshot,
        selection: &RangeSelection,
        now: NaiveDateTime,
    ) -> ReportResult<DashboardReport> {
        let span = info_span!("dashboard.build", kind = selection.kind(), comparison = false);
        let _guard = span.enter();

        let range = resolve(selection, now)?;
        Ok(self.assemble(snapshot, range))
    }

    /// Like [`build`](Self::build), plus a comparison against the window of
    /// equal length immediately before the selected one.
    pub fn build_with_previous(
        &self,
        snapshot: &DashboardSnapshot,
        selection: &RangeSelection,
        now: NaiveDateTime,
    ) -> ReportResult<DashboardReport> {
        let span = info_span!("dashboard.build", kind = selection.kind(), comparison = true);
        let _guard = span.enter();

        let range = resolve(selection, now)?;
        let previous_range = range.preceding()?;

        let mut report = self.assemble(snapshot, range);
        report.comparison = Some(self.compare(snapshot, &report.summary, previous_range));
        Ok(report)
    }

    fn assemble(&self, snapshot: &DashboardSnapshot, range: ResolvedRange) -> DashboardReport {
        let orders = &snapshot.orders;
        let index = ProductIndex::new(&snapshot.products);

        let counted = bucketize(orders, &range);
        let dropped = orders.len() - counted.total_count() as usize;
        if dropped > 0 {
            trace!(dropped, "Orders outside the selected range");
        }

        let series = aggregate(&counted, orders, &index);
        let categories = category_breakdown(orders, &index, &range);
        let best_sellers = rank_best_sellers(
            orders_in_range(orders, &range),
            &index,
            self.config.best_seller_limit(),
        );

        let visits = &snapshot.visitors;
        let visitors = reconcile(
            visits.online_now,
            &visits.today,
            &visits.total,
            &visits.chart,
            &counted,
        );

        let statuses = StatusBreakdown::from_orders(orders, &range);
        let summary = self.summarize(&series);

        debug!(
            buckets = series.len(),
            orders = summary.total_orders,
            revenue_orders = summary.revenue_orders,
            categories = categories.len(),
            best_sellers = best_sellers.len(),
            "Dashboard report built"
        );

        DashboardReport {
            range,
            series,
            categories,
            best_sellers,
            visitors,
            statuses,
            summary,
            comparison: None,
        }
    }

    fn summarize(&self, series: &BucketSeries) -> ReportSummary {
        let format = self.config.currency_format();
        let total_revenue = series.total_sum();
        let revenue_orders = series.total_revenue_orders();
        let average_order_value = if revenue_orders > 0 {
            total_revenue / f64::from(revenue_orders)
        } else {
            0.0
        };

        ReportSummary {
            total_revenue,
            total_orders: series.total_count(),
            revenue_orders,
            average_order_value,
            formatted_revenue: format.format(total_revenue),
            formatted_average: format.format(average_order_value),
        }
    }

    fn compare(
        &self,
        snapshot: &DashboardSnapshot,
        current: &ReportSummary,
        previous_range: ResolvedRange,
    ) -> PeriodComparison {
        let index = ProductIndex::new(&snapshot.products);
        let previous = aggregate(
            &bucketize(&snapshot.orders, &previous_range),
            &snapshot.orders,
            &index,
        );
        let previous_revenue = previous.total_sum();
        let previous_orders = previous.total_count();

        debug!(
            previous_orders,
            previous_start = %previous_range.start,
            "Compared against preceding window"
        );

        PeriodComparison {
            previous_range,
            previous_revenue,
            previous_orders,
            revenue_change: period_over_period(current.total_revenue, previous_revenue),
            orders_change: period_over_period(
                f64::from(current.total_orders),
                f64::from(previous_orders),
            ),
        }
    }
}

/// Orders that fall inside `range`, in input order.
pub fn orders_in_range<'a>(orders: &'a [Order], range: &ResolvedRange) -> Vec<&'a Order> {
    orders.iter().filter(|o| range.contains(o.created_at)).collect()
}

// =============================================================================
// Unit Tests
// =============================================================================
