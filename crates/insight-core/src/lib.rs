//! # insight-core: Pure Analytics Engine for Storefront Insights
//!
//! This crate turns raw order and visitor records into the fixed-size,
//! zero-filled series behind the back-office dashboard charts. It contains
//! only pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Storefront Insights Architecture                    │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Dashboard (web frontend)                     │   │
//! │  │   Revenue chart ── Category donut ── Best sellers ── Visitors   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ JSON (ts-rs generated types)           │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    insight-report                               │   │
//! │  │      config, tracing, DashboardBuilder, JSON export             │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ insight-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────┐  ┌──────────┐  ┌──────────┐  ┌──────────────┐   │   │
//! │  │   │  range   │─►│  bucket  │─►│ category │  │   ranking    │   │   │
//! │  │   │ resolve  │  │ scaffold │  │ status   │  │ best sellers │   │   │
//! │  │   └──────────┘  └────┬─────┘  └──────────┘  └──────────────┘   │   │
//! │  │                      └────────► visitors (same scaffold)        │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO CLOCK • NO LOGGING • PURE FUNCTIONS               │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Input records (Order, Product, VisitorSample)
//! - [`range`] - Date-range selection and resolution
//! - [`timestamp`] - Lenient parsing of order dates
//! - [`bucket`] - Zero-filled time series
//! - [`status`] - Revenue whitelist and status tallies
//! - [`category`] - Product lookup and category rollups
//! - [`ranking`] - Best-seller table
//! - [`visitors`] - Visitor counters and page-view series
//! - [`money`] - Rounding and currency formatting
//! - [`validation`] - Settings bounds
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use chrono::NaiveDate;
//! use insight_core::{aggregate, bucketize, resolve, Order, OrderStatus, ProductIndex, RangeSelection};
//!
//! let jan = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
//! let now = jan.and_hms_opt(12, 0, 0).unwrap();
//! let range = resolve(&RangeSelection::month_of(jan), now).unwrap();
//!
//! let orders = vec![Order::new("o1", 100.0, OrderStatus::Delivered, now)];
//! let index = ProductIndex::new(&[]);
//! let series = aggregate(&bucketize(&orders, &range), &orders, &index);
//!
//! assert_eq!(series.len(), 31);
//! assert_eq!(series.total_sum(), 100.0);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod bucket;
pub mod category;
pub mod error;
pub mod money;
pub mod range;
pub mod ranking;
pub mod status;
pub mod timestamp;
pub mod types;
pub mod validation;
pub mod visitors;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use bucket::{bucketize, Aggregates, Bucket, BucketSeries};
pub use category::{aggregate, category_breakdown, resolve_category, CategoryShare, ProductIndex};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::{format_amount, CurrencyFormat};
pub use range::{resolve, Granularity, QuickSelect, RangeSelection, ResolvedRange};
pub use ranking::{rank_best_sellers, BestSellerEntry};
pub use status::{StatusBreakdown, REVENUE_STATUSES};
pub use timestamp::parse_order_timestamp;
pub use types::*;
pub use visitors::{period_over_period, reconcile, VisitorPoint, VisitorStatsView};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Category for orders whose product (or product category) is unknown.
pub const OTHER_CATEGORY: &str = "Other";

/// Rows in the best-seller table when nothing else is configured.
pub const DEFAULT_BEST_SELLER_LIMIT: usize = 5;

/// Upper bound for a configured best-seller limit.
pub const MAX_BEST_SELLER_LIMIT: usize = 100;

/// Calendar years shown by the `year` selection, current year included.
pub const YEAR_WINDOW_YEARS: i32 = 5;

/// Calendar months shown by the `all` selection, current month included.
pub const ALL_WINDOW_MONTHS: u32 = 12;

/// Most decimal places an amount may be formatted with.
pub const MAX_CURRENCY_DECIMALS: u8 = 4;

/// Longest accepted currency symbol, in characters.
pub const MAX_CURRENCY_SYMBOL_LEN: usize = 8;
