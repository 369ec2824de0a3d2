//! # Report Error Types
//!
//! Error types for building and exporting dashboard reports.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Report Error Categories                            │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │     Engine      │  │  Configuration  │  │     Serialization       │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  Core           │  │  InvalidConfig  │  │  Json                   │ │
//! │  │  (InvalidRange, │  │  ConfigLoad...  │  │                         │ │
//! │  │   Validation)   │  │  Io, TomlParse  │  │                         │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use insight_core::{CoreError, ValidationError};
use thiserror::Error;

/// Result type alias for report operations.
pub type ReportResult<T> = Result<T, ReportError>;

/// Everything that can go wrong while building a report.
#[derive(Debug, Error)]
pub enum ReportError {
    // =========================================================================
    // Engine Errors
    // =========================================================================
    /// Error from insight-core, passed through unchanged.
    #[error(transparent)]
    Core(#[from] CoreError),

    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Invalid report configuration.
    #[error("Invalid insights configuration: {0}")]
    InvalidConfig(String),

    /// Failed to load config file.
    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    /// I/O error while reading config.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Config file is not valid TOML for [`crate::config::InsightConfig`].
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    // =========================================================================
    // Serialization Errors
    // =========================================================================
    /// JSON encoding or decoding failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<ValidationError> for ReportError {
    fn from(err: ValidationError) -> Self {
        ReportError::InvalidConfig(err.to_string())
    }
}

impl ReportError {
    /// Returns true if the caller supplied a bad date range.
    pub fn is_invalid_range(&self) -> bool {
        matches!(self, ReportError::Core(CoreError::InvalidRange { .. }))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_error_passes_through() {
        let core = CoreError::InvalidRange {
            reason: "start is after end".to_string(),
        };
        let err: ReportError = core.clone().into();
        assert!(err.is_invalid_range());
        assert_eq!(err.to_string(), core.to_string());
    }

    #[test]
    fn test_validation_becomes_invalid_config() {
        let err: ReportError = ValidationError::Required {
            field: "currency_symbol".to_string(),
        }
        .into();
        assert!(matches!(err, ReportError::InvalidConfig(_)));
        assert_eq!(
            err.to_string(),
            "Invalid insights configuration: currency_symbol is required"
        );
        assert!(!err.is_invalid_range());
    }
}
