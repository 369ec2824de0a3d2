//! # Ranking Module
//!
//! Best-selling products by order count, then revenue.
//!
//! ## Ordering
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. order_count   descending                                            │
//! │  2. revenue       descending                                            │
//! │  3. product_id    ascending   (final tie-break, total order)            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The last key makes the ranking a function of the input *set*: shuffling
//! the orders never changes the table.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::category::ProductIndex;
use crate::types::{Order, Product};

/// One row of the best-seller table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct BestSellerEntry {
    pub product_id: String,
    pub product_name: String,
    pub order_count: u32,
    pub revenue: f64,
    /// The product's list price, when the catalog has one.
    pub unit_price: Option<f64>,
}

impl BestSellerEntry {
    fn for_product(product: &Product) -> Self {
        BestSellerEntry {
            product_id: product.id.clone(),
            product_name: product.name.clone(),
            order_count: 0,
            revenue: 0.0,
            unit_price: product.price,
        }
    }
}

/// Ranks catalog products by how often they were ordered.
///
/// - Only revenue-eligible orders are counted
/// - Orders that match no product are left out (no "Other" row here)
/// - An order with a zero amount contributes the product's list price
/// - The result holds at most `limit` entries and is never padded
///
/// Callers filter `orders` to the selected range first.
///
/// ## Example
/// ```rust
/// use chrono::NaiveDate;
/// use insight_core::category::ProductIndex;
/// use insight_core::ranking::rank_best_sellers;
/// use insight_core::types::{Order, OrderStatus, Product};
///
/// let products = vec![Product::new("p1", "Mug"), Product::new("p2", "Teapot")];
/// let index = ProductIndex::new(&products);
/// let ts = NaiveDate::from_ymd_opt(2025, 1, 5).unwrap().and_hms_opt(9, 0, 0).unwrap();
/// let orders = vec![
///     Order::new("o1", 12.0, OrderStatus::Delivered, ts).with_product_id("p2"),
///     Order::new("o2", 8.0, OrderStatus::Pending, ts).with_product_id("p1"),
///     Order::new("o3", 8.0, OrderStatus::Shipped, ts).with_product_id("p1"),
/// ];
///
/// let ranked = rank_best_sellers(&orders, &index, 5);
/// assert_eq!(ranked[0].product_id, "p1");
/// assert_eq!(ranked[0].order_count, 2);
/// assert_eq!(ranked.len(), 2);
/// ```
pub fn rank_best_sellers<'a, I>(
    orders: I,
    index: &ProductIndex<'_>,
    limit: usize,
) -> Vec<BestSellerEntry>
where
    I: IntoIterator<Item = &'a Order>,
{
    let mut entries: Vec<BestSellerEntry> = Vec::new();
    let mut positions: HashMap<&str, usize> = HashMap::new();

    for order in orders {
        if !order.status.is_revenue_eligible() {
            continue;
        }
        let Some(product) = index.find(order) else {
            continue;
        };

        let position = *positions.entry(product.id.as_str()).or_insert_with(|| {
            entries.push(BestSellerEntry::for_product(product));
            entries.len() - 1
        });

        let amount = if order.amount == 0.0 {
            product.price.unwrap_or(0.0)
        } else {
            order.amount
        };

        let entry = &mut entries[position];
        entry.order_count += 1;
        entry.revenue += amount;
    }

    entries.sort_by(|a, b| {
        b.order_count
            .cmp(&a.order_count)
            .then_with(|| b.revenue.total_cmp(&a.revenue))
            .then_with(|| a.product_id.cmp(&b.product_id))
    });
    entries.truncate(limit);
    entries
}
