//! # Domain Types
//!
//! Record types the dashboard hands to the engine.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │     Order       │   │    Product      │   │  VisitorSample  │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  id             │   │  recorded_at    │       │
//! │  │  amount (f64)   │   │  name           │   │  page_views     │       │
//! │  │  status         │   │  category?      │   │  visitors       │       │
//! │  │  created_at     │   │  price?         │   │  device?        │       │
//! │  │  product_id?    │   │  stock?         │   └─────────────────┘       │
//! │  │  product_name?  │   └─────────────────┘                              │
//! │  └─────────────────┘                                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                              │
//! │  │  OrderStatus    │   │   DeviceKind    │                              │
//! │  │  Pending ...    │   │  Mobile         │                              │
//! │  │  Delivered      │   │  Tablet         │                              │
//! │  │  Cancelled      │   │  Desktop        │                              │
//! │  │  Returned       │   └─────────────────┘                              │
//! │  └─────────────────┘                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Semantics
//! Every record is an immutable snapshot supplied per call. The engine
//! only ever borrows them.
//!
//! ## Timestamps
//! All timestamps are local wall-clock (`NaiveDateTime`). Converting from
//! UTC to the tenant's zone is the caller's job.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

// =============================================================================
// Order Status
// =============================================================================

/// Lifecycle state of an order at evaluation time.
///
/// Wire names match the labels used by the order management screens.
/// The storefront also writes `"Return"`, `"Refund"` and `"Returned Receive"`
/// for the same terminal state; those deserialize to [`OrderStatus::Returned`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum OrderStatus {
    Pending,
    Confirmed,
    #[serde(rename = "On Hold")]
    OnHold,
    Processing,
    Shipped,
    #[serde(rename = "Sent to Courier")]
    SentToCourier,
    Delivered,
    Cancelled,
    #[serde(alias = "Return", alias = "Refund", alias = "Returned Receive")]
    Returned,
}

impl OrderStatus {
    /// Every status, in lifecycle order.
    pub const ALL: [OrderStatus; 9] = [
        OrderStatus::Pending,
        OrderStatus::Confirmed,
        OrderStatus::OnHold,
        OrderStatus::Processing,
        OrderStatus::Shipped,
        OrderStatus::SentToCourier,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
        OrderStatus::Returned,
    ];

    /// Display label, identical to the serialized name.
    pub const fn label(self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Confirmed => "Confirmed",
            OrderStatus::OnHold => "On Hold",
            OrderStatus::Processing => "Processing",
            OrderStatus::Shipped => "Shipped",
            OrderStatus::SentToCourier => "Sent to Courier",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::Cancelled => "Cancelled",
            OrderStatus::Returned => "Returned",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// Order
// =============================================================================

/// An order as fetched from the orders endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Order {
    pub id: String,

    /// Order total in the tenant's base currency.
    pub amount: f64,

    pub status: OrderStatus,

    /// When the order was placed (local wall-clock).
    #[ts(as = "String")]
    pub created_at: NaiveDateTime,

    #[serde(default)]
    pub product_id: Option<String>,

    #[serde(default)]
    pub product_name: Option<String>,

    /// Category as typed on the order form. Carried through untouched;
    /// category resolution goes through the product catalog instead.
    #[serde(default)]
    pub category: Option<String>,
}

impl Order {
    /// Creates an order with no product reference.
    pub fn new(
        id: impl Into<String>,
        amount: f64,
        status: OrderStatus,
        created_at: NaiveDateTime,
    ) -> Self {
        Order {
            id: id.into(),
            amount,
            status,
            created_at,
            product_id: None,
            product_name: None,
            category: None,
        }
    }

    /// Sets the referenced product id.
    pub fn with_product_id(mut self, product_id: impl Into<String>) -> Self {
        self.product_id = Some(product_id.into());
        self
    }

    /// Sets the referenced product name.
    pub fn with_product_name(mut self, product_name: impl Into<String>) -> Self {
        self.product_name = Some(product_name.into());
        self
    }
}

// =============================================================================
// Product
// =============================================================================

/// A catalog product. Only used for category lookup and price fallback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Product {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub stock: Option<i64>,
}

impl Product {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Product {
            id: id.into(),
            name: name.into(),
            category: None,
            price: None,
            stock: None,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }
}

// =============================================================================
// Visitor Samples
// =============================================================================

/// Device class a page view came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum DeviceKind {
    Mobile,
    Tablet,
    #[default]
    Desktop,
}

/// One row of the visitor statistics feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct VisitorSample {
    #[ts(as = "String")]
    pub recorded_at: NaiveDateTime,
    #[serde(default)]
    pub page_views: u32,
    #[serde(default)]
    pub visitors: u32,
    #[serde(default)]
    pub device: Option<DeviceKind>,
}

impl VisitorSample {
    pub fn new(recorded_at: NaiveDateTime, page_views: u32, visitors: u32) -> Self {
        VisitorSample {
            recorded_at,
            page_views,
            visitors,
            device: None,
        }
    }

    pub fn with_device(mut self, device: DeviceKind) -> Self {
        self.device = Some(device);
        self
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_wire_names() {
        let json = serde_json::to_string(&OrderStatus::SentToCourier).unwrap();
        assert_eq!(json, "\"Sent to Courier\"");

        let parsed: OrderStatus = serde_json::from_str("\"On Hold\"").unwrap();
        assert_eq!(parsed, OrderStatus::OnHold);
    }

    #[test]
    fn test_status_return_aliases() {
        for raw in ["\"Returned\"", "\"Return\"", "\"Refund\"", "\"Returned Receive\""] {
            let parsed: OrderStatus = serde_json::from_str(raw).unwrap();
            assert_eq!(parsed, OrderStatus::Returned, "alias {raw}");
        }
    }

    #[test]
    fn test_status_label_matches_display() {
        for status in OrderStatus::ALL {
            assert_eq!(status.to_string(), status.label());
        }
    }

    #[test]
    fn test_order_deserializes_from_camel_case() {
        let json = r#"{
            "id": "ord-1",
            "amount": 120.5,
            "status": "Delivered",
            "createdAt": "2025-01-05T10:30:00",
            "productName": "Desk Lamp"
        }"#;
        let order: Order = serde_json::from_str(json).unwrap();
        assert_eq!(order.id, "ord-1");
        assert_eq!(order.status, OrderStatus::Delivered);
        assert_eq!(order.product_id, None);
        assert_eq!(order.product_name.as_deref(), Some("Desk Lamp"));
    }

    #[test]
    fn test_visitor_sample_defaults() {
        let json = r#"{ "recordedAt": "2025-01-05T00:00:00" }"#;
        let sample: VisitorSample = serde_json::from_str(json).unwrap();
        assert_eq!(sample.page_views, 0);
        assert_eq!(sample.visitors, 0);
        assert_eq!(sample.device, None);
    }
}
