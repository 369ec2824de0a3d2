//! # Money Module
//!
//! Rounding and display formatting for order amounts.
//!
//! ## Floats In, Strings Out
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  The storefront API sends amounts as JSON numbers (base currency).      │
//! │                                                                         │
//! │  Order.amount (f64) ──► sums per bucket / category / product (f64)      │
//! │                                   │                                     │
//! │                                   ▼                                     │
//! │                     format_amount() ──► "$1,234.50"                     │
//! │                                                                         │
//! │  Aggregates stay f64 so charts get exact sums of what the API sent.     │
//! │  Rounding happens once, at display time, half-up like the dashboard.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use insight_core::money::{format_amount, CurrencyFormat};
//!
//! let usd = CurrencyFormat::default();
//! assert_eq!(format_amount(1234.5, &usd), "$1,234.50");
//! assert_eq!(format_amount(-80.0, &usd), "-$80.00");
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::MAX_CURRENCY_DECIMALS;

/// Rounds to the nearest integer, halves toward positive infinity.
///
/// This is the rounding the dashboard's charts use for percentages:
/// `2.5` becomes `3` and `-2.5` becomes `-2`.
///
/// ## Example
/// ```rust
/// use insight_core::money::round_half_up;
///
/// assert_eq!(round_half_up(2.5), 3.0);
/// assert_eq!(round_half_up(-2.5), -2.0);
/// assert_eq!(round_half_up(49.4), 49.0);
/// ```
#[inline]
pub fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

// =============================================================================
// Currency Format
// =============================================================================

/// How amounts are rendered in summary tiles and tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CurrencyFormat {
    /// Prefix placed after the sign, e.g. `"$"` or `"৳"`.
    pub symbol: String,
    /// Digits after the decimal point. Values above 4 are clamped.
    pub decimals: u8,
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        CurrencyFormat {
            symbol: "$".to_string(),
            decimals: 2,
        }
    }
}

impl CurrencyFormat {
    pub fn new(symbol: impl Into<String>, decimals: u8) -> Self {
        CurrencyFormat {
            symbol: symbol.into(),
            decimals,
        }
    }

    /// Shorthand for [`format_amount`] with this format.
    pub fn format(&self, amount: f64) -> String {
        format_amount(amount, self)
    }
}

/// Formats an amount for display.
///
/// ## Rules
/// - Rounded half-up to `format.decimals` places
/// - Thousands grouped with `,`
/// - Negative sign goes before the symbol (`-$5.00`)
/// - NaN and infinities render as zero
/// - A value that rounds to zero never shows a sign
pub fn format_amount(amount: f64, format: &CurrencyFormat) -> String {
    let amount = if amount.is_finite() { amount } else { 0.0 };
    let decimals = format.decimals.min(MAX_CURRENCY_DECIMALS);
    let scale = 10u64.pow(u32::from(decimals));

    // `as` saturates for out-of-range floats.
    let units = round_half_up(amount.abs() * scale as f64) as u64;
    let whole = units / scale;
    let fraction = units % scale;

    let sign = if amount < 0.0 && units > 0 { "-" } else { "" };
    let mut out = format!("{sign}{}{}", format.symbol, group_thousands(whole));
    if decimals > 0 {
        out.push('.');
        out.push_str(&format!("{fraction:0width$}", width = usize::from(decimals)));
    }
    out
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let len = digits.len();
    let mut grouped = String::with_capacity(len + len / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

// =============================================================================
// Unit Tests
// =============================================================================
