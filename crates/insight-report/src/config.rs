//! # Insights Configuration
//!
//! Tunable settings for report building.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     INSIGHT_BEST_SELLER_LIMIT=10                                       │
//! │     INSIGHT_CURRENCY_SYMBOL=৳                                          │
//! │     INSIGHT_CURRENCY_DECIMALS=0                                        │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/insights/insights.toml (Linux)                           │
//! │     ~/Library/Application Support/com.storefront.insights/ (macOS)     │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     5 best sellers, "$" with 2 decimals                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # insights.toml
//! [ranking]
//! best_seller_limit = 5
//!
//! [display]
//! currency_symbol = "$"
//! currency_decimals = 2
//! ```

use std::path::{Path, PathBuf};

use insight_core::money::CurrencyFormat;
use insight_core::validation::{
    validate_best_seller_limit, validate_currency_decimals, validate_currency_symbol,
};
use insight_core::DEFAULT_BEST_SELLER_LIMIT;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{ReportError, ReportResult};

/// File name looked up in the platform config directory.
pub const CONFIG_FILE_NAME: &str = "insights.toml";

// =============================================================================
// Ranking Settings
// =============================================================================

/// Settings for the best-seller table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankingSettings {
    /// Rows shown in the best-seller table (1-100).
    #[serde(default = "default_best_seller_limit")]
    pub best_seller_limit: usize,
}

fn default_best_seller_limit() -> usize {
    DEFAULT_BEST_SELLER_LIMIT
}

impl Default for RankingSettings {
    fn default() -> Self {
        RankingSettings {
            best_seller_limit: default_best_seller_limit(),
        }
    }
}

// =============================================================================
// Display Settings
// =============================================================================

/// How amounts are rendered in summary tiles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplaySettings {
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,

    /// Digits after the decimal point (0-4).
    #[serde(default = "default_currency_decimals")]
    pub currency_decimals: u8,
}

fn default_currency_symbol() -> String {
    "$".to_string()
}

fn default_currency_decimals() -> u8 {
    2
}

impl Default for DisplaySettings {
    fn default() -> Self {
        DisplaySettings {
            currency_symbol: default_currency_symbol(),
            currency_decimals: default_currency_decimals(),
        }
    }
}

// =============================================================================
// Main Configuration
// =============================================================================

/// Complete settings for [`crate::report::DashboardBuilder`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsightConfig {
    #[serde(default)]
    pub ranking: RankingSettings,

    #[serde(default)]
    pub display: DisplaySettings,
}

impl InsightConfig {
    /// Loads configuration from file and environment.
    ///
    /// ## Loading Order
    /// 1. Start with defaults
    /// 2. Read `config_path`, or the platform default path when `None`
    /// 3. Apply `INSIGHT_*` environment overrides
    /// 4. Validate
    ///
    /// A missing file at the platform default path is fine. A missing file
    /// at an explicitly given path is an error.
    pub fn load(config_path: Option<PathBuf>) -> ReportResult<Self> {
        Self::load_with(config_path, |key| std::env::var(key).ok())
    }

    fn load_with<F>(config_path: Option<PathBuf>, lookup: F) -> ReportResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let explicit = config_path.is_some();
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading insights config from file");
                config = Self::read_file(&path)?;
            } else if explicit {
                return Err(ReportError::ConfigLoadFailed(format!(
                    "{} does not exist",
                    path.display()
                )));
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides_from(lookup);
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load insights config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Parses and validates a TOML document. Environment is not consulted.
    pub fn from_toml_str(contents: &str) -> ReportResult<Self> {
        let config: InsightConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    fn read_file(path: &Path) -> ReportResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ReportResult<()> {
        validate_best_seller_limit(self.ranking.best_seller_limit)?;
        validate_currency_symbol(&self.display.currency_symbol)?;
        validate_currency_decimals(self.display.currency_decimals)?;
        Ok(())
    }

    /// Applies overrides from any key lookup. Unparseable values are
    /// logged and ignored.
    pub fn apply_env_overrides_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(limit) = lookup("INSIGHT_BEST_SELLER_LIMIT") {
            match limit.trim().parse::<usize>() {
                Ok(parsed) => {
                    debug!(limit = parsed, "Overriding best-seller limit from environment");
                    self.ranking.best_seller_limit = parsed;
                }
                Err(_) => warn!(value = %limit, "Ignoring invalid INSIGHT_BEST_SELLER_LIMIT"),
            }
        }

        if let Some(symbol) = lookup("INSIGHT_CURRENCY_SYMBOL") {
            debug!(symbol = %symbol, "Overriding currency symbol from environment");
            self.display.currency_symbol = symbol.trim().to_string();
        }

        if let Some(decimals) = lookup("INSIGHT_CURRENCY_DECIMALS") {
            match decimals.trim().parse::<u8>() {
                Ok(parsed) => {
                    debug!(decimals = parsed, "Overriding currency decimals from environment");
                    self.display.currency_decimals = parsed;
                }
                Err(_) => warn!(value = %decimals, "Ignoring invalid INSIGHT_CURRENCY_DECIMALS"),
            }
        }
    }

    /// Returns the default config file path for this platform.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "storefront", "insights")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    /// Returns the best-seller row limit.
    pub fn best_seller_limit(&self) -> usize {
        self.ranking.best_seller_limit
    }

    /// The display format for amounts.
    pub fn currency_format(&self) -> CurrencyFormat {
        CurrencyFormat::new(
            self.display.currency_symbol.trim(),
            self.display.currency_decimals,
        )
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
