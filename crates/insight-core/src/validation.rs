//! # Validation Module
//!
//! Bounds checks for the engine's tunable settings.
//!
//! ## Where Settings Come From
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  defaults ──► insights.toml ──► INSIGHT_* env vars                      │
//! │                                       │                                 │
//! │                                       ▼                                 │
//! │                     InsightConfig::validate() (insight-report)          │
//! │                                       │                                 │
//! │                                       ▼                                 │
//! │                     THIS MODULE: pure bounds checks                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use insight_core::validation::{validate_best_seller_limit, validate_currency_symbol};
//!
//! assert!(validate_best_seller_limit(5).is_ok());
//! assert!(validate_currency_symbol("").is_err());
//! ```

use crate::error::ValidationError;
use crate::{MAX_BEST_SELLER_LIMIT, MAX_CURRENCY_DECIMALS, MAX_CURRENCY_SYMBOL_LEN};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validates how many rows the best-seller table may hold.
///
/// ## Rules
/// - At least 1
/// - At most [`MAX_BEST_SELLER_LIMIT`]
pub fn validate_best_seller_limit(limit: usize) -> ValidationResult<()> {
    if limit == 0 || limit > MAX_BEST_SELLER_LIMIT {
        return Err(ValidationError::OutOfRange {
            field: "best_seller_limit".to_string(),
            min: 1,
            max: MAX_BEST_SELLER_LIMIT as i64,
        });
    }
    Ok(())
}

/// Validates a currency symbol.
///
/// ## Rules
/// - Must not be empty or whitespace
/// - At most [`MAX_CURRENCY_SYMBOL_LEN`] characters
///
/// ## Returns
/// The trimmed symbol.
///
/// ## Example
/// ```rust
/// use insight_core::validation::validate_currency_symbol;
///
/// assert_eq!(validate_currency_symbol(" ৳ ").unwrap(), "৳");
/// assert!(validate_currency_symbol("   ").is_err());
/// ```
pub fn validate_currency_symbol(symbol: &str) -> ValidationResult<String> {
    let symbol = symbol.trim();

    if symbol.is_empty() {
        return Err(ValidationError::Required {
            field: "currency_symbol".to_string(),
        });
    }

    // Characters, not bytes: "৳" is three bytes.
    if symbol.chars().count() > MAX_CURRENCY_SYMBOL_LEN {
        return Err(ValidationError::TooLong {
            field: "currency_symbol".to_string(),
            max: MAX_CURRENCY_SYMBOL_LEN,
        });
    }

    Ok(symbol.to_string())
}

/// Validates the number of decimal places shown for amounts.
pub fn validate_currency_decimals(decimals: u8) -> ValidationResult<()> {
    if decimals > MAX_CURRENCY_DECIMALS {
        return Err(ValidationError::OutOfRange {
            field: "currency_decimals".to_string(),
            min: 0,
            max: i64::from(MAX_CURRENCY_DECIMALS),
        });
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_best_seller_limit() {
        assert!(validate_best_seller_limit(1).is_ok());
        assert!(validate_best_seller_limit(MAX_BEST_SELLER_LIMIT).is_ok());

        assert!(matches!(
            validate_best_seller_limit(0),
            Err(ValidationError::OutOfRange { min: 1, max: 100, .. })
        ));
        assert!(validate_best_seller_limit(MAX_BEST_SELLER_LIMIT + 1).is_err());
    }

    #[test]
    fn test_validate_currency_symbol() {
        assert_eq!(validate_currency_symbol("$").unwrap(), "$");
        assert_eq!(validate_currency_symbol("BDT ").unwrap(), "BDT");
        assert_eq!(validate_currency_symbol("৳৳৳৳৳৳৳৳").unwrap().chars().count(), 8);

        assert!(matches!(
            validate_currency_symbol(""),
            Err(ValidationError::Required { .. })
        ));
        assert!(matches!(
            validate_currency_symbol("ABCDEFGHI"),
            Err(ValidationError::TooLong { max: 8, .. })
        ));
    }

    #[test]
    fn test_validate_currency_decimals() {
        for decimals in 0..=4 {
            assert!(validate_currency_decimals(decimals).is_ok());
        }
        assert!(validate_currency_decimals(5).is_err());
    }
}
