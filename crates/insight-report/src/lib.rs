//! # insight-report: Dashboard Reports for Storefront Insights
//!
//! Runs the pure [`insight_core`] engine for one dashboard request and
//! packages the result for the web frontend.
//!
//! ## Responsibilities
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     insight-report (THIS CRATE)                         │
//! │                                                                         │
//! │   ┌──────────────┐   ┌───────────────┐   ┌──────────────────────────┐  │
//! │   │   config     │   │   snapshot    │   │        report            │  │
//! │   │ insights.toml│   │ orders, items │   │ DashboardBuilder         │  │
//! │   │ INSIGHT_* env│   │ visitor feeds │   │ DashboardReport (JSON)   │  │
//! │   └──────┬───────┘   └───────┬───────┘   └────────────▲─────────────┘  │
//! │          └───────────────────┴────────────────────────┘                │
//! │                                                                         │
//! │   Logging: tracing spans per build, subscriber set up by init_tracing  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example Usage
//! ```rust
//! use chrono::NaiveDate;
//! use insight_core::range::RangeSelection;
//! use insight_report::{DashboardBuilder, DashboardSnapshot, InsightConfig};
//!
//! let builder = DashboardBuilder::new(InsightConfig::default());
//! let now = NaiveDate::from_ymd_opt(2025, 1, 20).unwrap().and_hms_opt(9, 0, 0).unwrap();
//!
//! let report = builder
//!     .build(&DashboardSnapshot::default(), &RangeSelection::Day, now)
//!     .unwrap();
//! assert_eq!(report.series.len(), 24);
//! assert!(report.to_json().unwrap().contains("\"summary\""));
//! ```

use tracing_subscriber::EnvFilter;

// =============================================================================
// Module Declarations
// =============================================================================

pub mod config;
pub mod error;
pub mod report;
pub mod snapshot;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use config::InsightConfig;
pub use error::{ReportError, ReportResult};
pub use report::{DashboardBuilder, DashboardReport, PeriodComparison, ReportSummary};
pub use snapshot::{DashboardSnapshot, RawOrder, VisitorSnapshot};

/// Default log filter when `RUST_LOG` is not set.
pub const DEFAULT_LOG_FILTER: &str = "info,insight=debug";

/// Initializes the tracing subscriber for binaries that embed the engine.
///
/// ## Log Levels
/// - `RUST_LOG` wins when set
/// - Otherwise [`DEFAULT_LOG_FILTER`]
///
/// Returns false if the host already installed a global subscriber; that
/// subscriber is kept.
pub fn init_tracing() -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .is_ok()
}
