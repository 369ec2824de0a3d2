//! # Category Module
//!
//! Resolves each order to a product category and sums revenue per category.
//!
//! ## Resolution Order
//! ```text
//! order.product_id ──► catalog by id ──► found? ──► product.category
//!        │                                              │
//!        ▼ (missing or unknown)                         ▼ (empty)
//! order.product_name ──► catalog by lower-cased name ──► "Other"
//! ```
//!
//! Resolution never fails. Orders that match nothing are reported under
//! [`OTHER_CATEGORY`] so every eligible order lands in some slice of the
//! category chart.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::bucket::BucketSeries;
use crate::money::round_half_up;
use crate::range::ResolvedRange;
use crate::types::{Order, Product};
use crate::OTHER_CATEGORY;

// =============================================================================
// Product Index
// =============================================================================

/// Lookup tables over a borrowed product catalog.
///
/// When two products share an id or a (case-insensitive) name, the first
/// one in the catalog wins.
#[derive(Debug, Clone)]
pub struct ProductIndex<'a> {
    products: &'a [Product],
    by_id: HashMap<&'a str, usize>,
    by_name: HashMap<String, usize>,
}

impl<'a> ProductIndex<'a> {
    pub fn new(products: &'a [Product]) -> Self {
        let mut by_id = HashMap::with_capacity(products.len());
        let mut by_name = HashMap::with_capacity(products.len());

        for (position, product) in products.iter().enumerate() {
            by_id.entry(product.id.as_str()).or_insert(position);
            by_name.entry(product.name.to_lowercase()).or_insert(position);
        }

        ProductIndex {
            products,
            by_id,
            by_name,
        }
    }

    /// Finds the product an order refers to: by id first, then by name.
    pub fn find(&self, order: &Order) -> Option<&'a Product> {
        let by_id = order
            .product_id
            .as_deref()
            .and_then(|id| self.by_id.get(id));
        let by_name = || {
            order
                .product_name
                .as_deref()
                .filter(|name| !name.trim().is_empty())
                .and_then(|name| self.by_name.get(&name.to_lowercase()))
        };

        let products = self.products;
        by_id.or_else(by_name).map(|position| &products[*position])
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

// =============================================================================
// Resolution
// =============================================================================

/// The category an order's revenue is reported under.
///
/// ## Example
/// ```rust
/// use chrono::NaiveDate;
/// use insight_core::category::{resolve_category, ProductIndex};
/// use insight_core::types::{Order, OrderStatus, Product};
///
/// let products = vec![Product::new("p1", "Desk Lamp").with_category("Lighting")];
/// let index = ProductIndex::new(&products);
/// let ts = NaiveDate::from_ymd_opt(2025, 1, 5).unwrap().and_hms_opt(0, 0, 0).unwrap();
///
/// let by_name = Order::new("o1", 10.0, OrderStatus::Pending, ts).with_product_name("DESK LAMP");
/// let unknown = Order::new("o2", 10.0, OrderStatus::Pending, ts);
///
/// assert_eq!(resolve_category(&by_name, &index), "Lighting");
/// assert_eq!(resolve_category(&unknown, &index), "Other");
/// ```
pub fn resolve_category<'a>(order: &Order, index: &ProductIndex<'a>) -> &'a str {
    index
        .find(order)
        .and_then(|product| product.category.as_deref())
        .filter(|category| !category.trim().is_empty())
        .unwrap_or(OTHER_CATEGORY)
}

// =============================================================================
// Rollups
// =============================================================================

/// Returns a copy of `series` with revenue added per bucket and category.
///
/// Only revenue-eligible orders contribute; cancelled and returned orders
/// are ignored here entirely. The input series is left untouched, so the
/// same input always yields the same output.
pub fn aggregate<'a, I>(series: &BucketSeries, orders: I, index: &ProductIndex<'_>) -> BucketSeries
where
    I: IntoIterator<Item = &'a Order>,
{
    let mut populated = series.clone();

    for order in orders {
        if !order.status.is_revenue_eligible() {
            continue;
        }
        let Some(bucket) = populated
            .index_of(order.created_at)
            .and_then(|position| populated.bucket_mut(position))
        else {
            continue;
        };

        let aggregates = &mut bucket.aggregates;
        aggregates.revenue_orders += 1;
        aggregates.sum += order.amount;
        *aggregates
            .by_category
            .entry(resolve_category(order, index).to_string())
            .or_insert(0.0) += order.amount;
    }

    populated
}

/// Revenue of one category across a whole range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CategoryShare {
    pub name: String,
    pub value: f64,
    /// Whole-number share of the total, as drawn on the donut chart.
    pub share_percent: u32,
}

/// Category totals over `range`, largest first.
///
/// Ties keep the order in which categories were first seen in `orders`.
pub fn category_breakdown(
    orders: &[Order],
    index: &ProductIndex<'_>,
    range: &ResolvedRange,
) -> Vec<CategoryShare> {
    let mut totals: Vec<(&str, f64)> = Vec::new();
    let mut positions: HashMap<&str, usize> = HashMap::new();

    for order in orders
        .iter()
        .filter(|o| o.status.is_revenue_eligible() && range.contains(o.created_at))
    {
        let category = resolve_category(order, index);
        let position = *positions.entry(category).or_insert_with(|| {
            totals.push((category, 0.0));
            totals.len() - 1
        });
        totals[position].1 += order.amount;
    }

    // Stable: equal totals stay in first-seen order.
    totals.sort_by(|a, b| b.1.total_cmp(&a.1));

    let grand_total: f64 = totals.iter().map(|(_, value)| value).sum();
    totals
        .into_iter()
        .map(|(name, value)| CategoryShare {
            name: name.to_string(),
            value,
            share_percent: if grand_total > 0.0 {
                round_half_up(value / grand_total * 100.0).max(0.0) as u32
            } else {
                0
            },
        })
        .collect()
}
