//! # Error Types
//!
//! Domain-specific error types for insight-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  insight-core errors (this file)                                       │
//! │  ├── CoreError        - Range resolution failures                      │
//! │  └── ValidationError  - Settings outside their allowed bounds          │
//! │                                                                         │
//! │  insight-report errors (separate crate)                                │
//! │  └── ReportError      - Config loading, serialization, wraps CoreError │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ReportError → Dashboard           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## What Is NOT an Error
//! - An order whose product cannot be found lands in the "Other" category
//! - An unmatched order is left out of the best-seller ranking
//! - Empty input produces zero-filled output
//!
//! Reporting stays total even with dirty data; only a malformed range
//! selection is rejected.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core analytics errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// The selected date range cannot be resolved.
    ///
    /// ## When This Occurs
    /// - Custom range without a start or end date
    /// - Custom range whose start is after its end
    /// - Calendar arithmetic outside chrono's supported years
    ///
    /// ## User Workflow
    /// ```text
    /// Date picker: start=2025-03-10, end=2025-03-01
    ///      │
    ///      ▼
    /// resolve(Custom { .. })
    ///      │
    ///      ▼
    /// InvalidRange { reason: "start 2025-03-10 00:00:00 is after end ..." }
    ///      │
    ///      ▼
    /// Picker shows the message, nothing is aggregated
    /// ```
    #[error("Invalid date range: {reason}")]
    InvalidRange { reason: String },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl CoreError {
    pub(crate) fn invalid_range(reason: impl Into<String>) -> Self {
        CoreError::InvalidRange {
            reason: reason.into(),
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors for tunable engine settings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::invalid_range("custom range requires a start date");
        assert_eq!(
            err.to_string(),
            "Invalid date range: custom range requires a start date"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "currency_symbol".to_string(),
        };
        assert_eq!(err.to_string(), "currency_symbol is required");

        let err = ValidationError::OutOfRange {
            field: "best_seller_limit".to_string(),
            min: 1,
            max: 100,
        };
        assert_eq!(err.to_string(), "best_seller_limit must be between 1 and 100");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "currency_symbol".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
