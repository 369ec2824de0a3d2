//! # Dashboard Snapshot
//!
//! The records one report is built from.
//!
//! ## Two Ways In
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Typed JSON (createdAt = "2025-01-05T10:00:00")                         │
//! │     DashboardSnapshot::from_json() ───────────────┐                     │
//! │                                                   ▼                     │
//! │  Raw storefront feed (createdAt = "Jan 5, 2025")  DashboardSnapshot     │
//! │     RawOrder ── parse_order_timestamp() ──────────┘                     │
//! │                 (unparseable dates dropped)                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A snapshot is read-only once built. Callers take one consistent snapshot
//! per request and hand it to the builder.

use insight_core::timestamp::parse_order_timestamp;
use insight_core::types::{Order, OrderStatus, Product, VisitorSample};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::ReportResult;

// =============================================================================
// Visitor Snapshot
// =============================================================================

/// The visitor feeds, split the way the stats endpoint returns them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisitorSnapshot {
    /// Visitors active right now.
    #[serde(default)]
    pub online_now: u32,
    /// Samples recorded today.
    #[serde(default)]
    pub today: Vec<VisitorSample>,
    /// All-time samples used for the totals.
    #[serde(default)]
    pub total: Vec<VisitorSample>,
    /// Samples to draw on the page-view chart.
    #[serde(default)]
    pub chart: Vec<VisitorSample>,
}

// =============================================================================
// Dashboard Snapshot
// =============================================================================

/// Orders, catalog and visitor data for one report.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    #[serde(default)]
    pub orders: Vec<Order>,
    #[serde(default)]
    pub products: Vec<Product>,
    #[serde(default)]
    pub visitors: VisitorSnapshot,
}

impl DashboardSnapshot {
    pub fn new(orders: Vec<Order>, products: Vec<Product>) -> Self {
        DashboardSnapshot {
            orders,
            products,
            visitors: VisitorSnapshot::default(),
        }
    }

    pub fn with_visitors(mut self, visitors: VisitorSnapshot) -> Self {
        self.visitors = visitors;
        self
    }

    /// Parses a typed snapshot.
    pub fn from_json(json: &str) -> ReportResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Builds a snapshot from the raw order feed.
    ///
    /// Orders whose date cannot be parsed are dropped, as the dashboard
    /// does, and logged at `trace`.
    pub fn from_feed(raw_orders: Vec<RawOrder>, products: Vec<Product>) -> Self {
        let total = raw_orders.len();
        let orders: Vec<Order> = raw_orders
            .into_iter()
            .filter_map(|raw| {
                let id = raw.id.clone();
                let order = raw.into_order();
                if order.is_none() {
                    trace!(order_id = %id, "Dropping order with unparseable date");
                }
                order
            })
            .collect();

        if orders.len() < total {
            trace!(dropped = total - orders.len(), "Orders dropped from feed");
        }

        DashboardSnapshot::new(orders, products)
    }
}

// =============================================================================
// Raw Feed Orders
// =============================================================================

/// An order as the storefront writes it, with a free-form date string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawOrder {
    pub id: String,
    /// Missing amounts count as zero.
    #[serde(default)]
    pub amount: f64,
    pub status: OrderStatus,
    #[serde(alias = "date")]
    pub created_at: String,
    #[serde(default)]
    pub product_id: Option<String>,
    #[serde(default)]
    pub product_name: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

impl RawOrder {
    /// Converts to a typed order, or `None` when the date is unparseable.
    pub fn into_order(self) -> Option<Order> {
        let created_at = parse_order_timestamp(&self.created_at)?;
        Some(Order {
            id: self.id,
            amount: self.amount,
            status: self.status,
            created_at,
            product_id: self.product_id,
            product_name: self.product_name,
            category: self.category,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_from_json_with_defaults() {
        let json = r#"{
            "orders": [
                {"id": "o1", "amount": 12.5, "status": "Sent to Courier",
                 "createdAt": "2025-01-05T10:00:00", "productId": "p1"}
            ],
            "visitors": {"onlineNow": 4}
        }"#;

        let snapshot = DashboardSnapshot::from_json(json).unwrap();
        assert_eq!(snapshot.orders.len(), 1);
        assert_eq!(snapshot.orders[0].status, OrderStatus::SentToCourier);
        assert!(snapshot.products.is_empty());
        assert_eq!(snapshot.visitors.online_now, 4);
        assert!(snapshot.visitors.chart.is_empty());
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(DashboardSnapshot::from_json("{\"orders\": 5}").is_err());
    }

    #[test]
    fn test_from_feed_parses_and_drops() {
        let feed: Vec<RawOrder> = serde_json::from_str(
            r#"[
                {"id": "a", "amount": 10, "status": "Pending", "date": "Jan 5, 2025"},
                {"id": "b", "status": "Refund", "createdAt": "2025-01-06 08:30:00"},
                {"id": "c", "amount": 3, "status": "Pending", "createdAt": "soon"}
            ]"#,
        )
        .unwrap();

        let snapshot = DashboardSnapshot::from_feed(feed, Vec::new());
        assert_eq!(snapshot.orders.len(), 2);
        assert_eq!(
            snapshot.orders[0].created_at,
            NaiveDate::from_ymd_opt(2025, 1, 5).unwrap().and_hms_opt(0, 0, 0).unwrap()
        );
        assert_eq!(snapshot.orders[1].status, OrderStatus::Returned);
        assert_eq!(snapshot.orders[1].amount, 0.0);
    }
}
