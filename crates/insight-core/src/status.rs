//! # Status Module
//!
//! Which order states count as revenue, and per-status tallies for the
//! order-status widget.
//!
//! ## Revenue Whitelist
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Counts toward revenue            Never counts                          │
//! │  ─────────────────────            ────────────                          │
//! │  Pending      Shipped             Cancelled                             │
//! │  Confirmed    Sent to Courier     Returned (incl. Return/Refund)        │
//! │  On Hold      Delivered                                                 │
//! │  Processing                                                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The table is fixed. Every chart asks this module instead of keeping its
//! own list.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::range::ResolvedRange;
use crate::types::{Order, OrderStatus};

/// Statuses whose amounts count toward revenue aggregates.
pub const REVENUE_STATUSES: [OrderStatus; 7] = [
    OrderStatus::Pending,
    OrderStatus::Confirmed,
    OrderStatus::OnHold,
    OrderStatus::Processing,
    OrderStatus::Shipped,
    OrderStatus::SentToCourier,
    OrderStatus::Delivered,
];

impl OrderStatus {
    /// Returns true if orders in this state count toward revenue.
    ///
    /// ## Example
    /// ```rust
    /// use insight_core::types::OrderStatus;
    ///
    /// assert!(OrderStatus::OnHold.is_revenue_eligible());
    /// assert!(!OrderStatus::Returned.is_revenue_eligible());
    /// ```
    pub const fn is_revenue_eligible(self) -> bool {
        match self {
            OrderStatus::Pending
            | OrderStatus::Confirmed
            | OrderStatus::OnHold
            | OrderStatus::Processing
            | OrderStatus::Shipped
            | OrderStatus::SentToCourier
            | OrderStatus::Delivered => true,
            OrderStatus::Cancelled | OrderStatus::Returned => false,
        }
    }
}

// =============================================================================
// Status Breakdown
// =============================================================================

/// Order counts per status within a range.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct StatusBreakdown {
    pub pending: u32,
    pub confirmed: u32,
    pub on_hold: u32,
    pub processing: u32,
    pub shipped: u32,
    pub sent_to_courier: u32,
    pub delivered: u32,
    pub cancelled: u32,
    pub returned: u32,
}

impl StatusBreakdown {
    /// Tallies the orders placed inside `range`.
    pub fn from_orders(orders: &[Order], range: &ResolvedRange) -> Self {
        orders
            .iter()
            .filter(|order| range.contains(order.created_at))
            .fold(StatusBreakdown::default(), |mut acc, order| {
                acc.record(order.status);
                acc
            })
    }

    /// Adds one order in `status`.
    pub fn record(&mut self, status: OrderStatus) {
        let slot = match status {
            OrderStatus::Pending => &mut self.pending,
            OrderStatus::Confirmed => &mut self.confirmed,
            OrderStatus::OnHold => &mut self.on_hold,
            OrderStatus::Processing => &mut self.processing,
            OrderStatus::Shipped => &mut self.shipped,
            OrderStatus::SentToCourier => &mut self.sent_to_courier,
            OrderStatus::Delivered => &mut self.delivered,
            OrderStatus::Cancelled => &mut self.cancelled,
            OrderStatus::Returned => &mut self.returned,
        };
        *slot += 1;
    }

    /// Count for a single status.
    pub fn get(&self, status: OrderStatus) -> u32 {
        match status {
            OrderStatus::Pending => self.pending,
            OrderStatus::Confirmed => self.confirmed,
            OrderStatus::OnHold => self.on_hold,
            OrderStatus::Processing => self.processing,
            OrderStatus::Shipped => self.shipped,
            OrderStatus::SentToCourier => self.sent_to_courier,
            OrderStatus::Delivered => self.delivered,
            OrderStatus::Cancelled => self.cancelled,
            OrderStatus::Returned => self.returned,
        }
    }

    /// Orders handed to a carrier (the widget's "Courier" tile).
    pub fn courier(&self) -> u32 {
        self.shipped + self.sent_to_courier
    }

    pub fn total(&self) -> u32 {
        OrderStatus::ALL.iter().map(|s| self.get(*s)).sum()
    }

    /// Orders that count toward revenue.
    pub fn revenue_eligible(&self) -> u32 {
        REVENUE_STATUSES.iter().map(|s| self.get(*s)).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::range::{resolve, RangeSelection};
    use chrono::NaiveDate;

    #[test]
    fn test_whitelist_matches_table() {
        for status in OrderStatus::ALL {
            assert_eq!(
                status.is_revenue_eligible(),
                REVENUE_STATUSES.contains(&status),
                "{status}"
            );
        }
        assert!(!OrderStatus::Cancelled.is_revenue_eligible());
        assert!(!OrderStatus::Returned.is_revenue_eligible());
    }

    #[test]
    fn test_breakdown_counts_only_in_range() {
        let day = NaiveDate::from_ymd_opt(2025, 1, 5).unwrap();
        let now = day.and_hms_opt(12, 0, 0).unwrap();
        let range = resolve(&RangeSelection::Day, now).unwrap();
        let yesterday = now - chrono::Duration::days(1);

        let orders = vec![
            Order::new("1", 10.0, OrderStatus::Pending, now),
            Order::new("2", 10.0, OrderStatus::Shipped, now),
            Order::new("3", 10.0, OrderStatus::SentToCourier, now),
            Order::new("4", 10.0, OrderStatus::Cancelled, now),
            Order::new("5", 10.0, OrderStatus::Delivered, yesterday),
        ];

        let breakdown = StatusBreakdown::from_orders(&orders, &range);
        assert_eq!(breakdown.total(), 4);
        assert_eq!(breakdown.courier(), 2);
        assert_eq!(breakdown.cancelled, 1);
        assert_eq!(breakdown.delivered, 0);
        assert_eq!(breakdown.revenue_eligible(), 3);
    }
}
