//! # Terminal Configuration
//!
//! Settings for one terminal: which store it belongs to, whether it takes
//! counter or table orders, how money is displayed, and where the catalog
//! snapshot lives.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Load Order (later overrides earlier)                 │
//! │                                                                         │
//! │  1. Defaults            TerminalConfig::default()                       │
//! │          │                                                              │
//! │          ▼                                                              │
//! │  2. Config file         terminal.toml (given path or platform dir)      │
//! │          │                                                              │
//! │          ▼                                                              │
//! │  3. Environment         COMANDA_STORE_NAME, COMANDA_ORIGIN,             │
//! │          │              COMANDA_TABLE_ID, COMANDA_CURRENCY_SYMBOL,      │
//! │          │              COMANDA_CATALOG_PATH                            │
//! │          ▼                                                              │
//! │  4. validate()                                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example `terminal.toml`
//! ```toml
//! store_name = "Pizzaria Bella"
//! origin = "waiter"
//! table_id = "12"
//! currency_code = "BRL"
//! currency_symbol = "R$"
//! catalog_path = "/var/lib/comanda/catalog.json"
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use comanda_core::OrderOrigin;

// =============================================================================
// Errors
// =============================================================================

/// Configuration loading and validation errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Cannot read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("A waiter terminal needs a table id")]
    MissingTableId,
}

pub type ConfigResult<T> = Result<T, ConfigError>;

// =============================================================================
// Origin Mode
// =============================================================================

/// Which surface this terminal runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OriginMode {
    /// Counter screen; orders are tagged `pos`.
    #[default]
    Pos,
    /// Waiter app; orders are tagged with a table.
    Waiter,
}

impl std::fmt::Display for OriginMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OriginMode::Pos => write!(f, "pos"),
            OriginMode::Waiter => write!(f, "waiter"),
        }
    }
}

impl std::str::FromStr for OriginMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pos" | "counter" => Ok(OriginMode::Pos),
            "waiter" | "table" => Ok(OriginMode::Waiter),
            other => Err(ConfigError::Invalid(format!("unknown origin: {}", other))),
        }
    }
}

// =============================================================================
// Terminal Config
// =============================================================================

/// Complete terminal configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerminalConfig {
    /// Store name shown on the order header
    pub store_name: String,

    /// Counter or waiter terminal
    pub origin: OriginMode,

    /// Table used when a waiter order does not name one
    pub table_id: Option<String>,

    /// Currency code (ISO 4217)
    pub currency_code: String,

    /// Currency symbol (for display)
    pub currency_symbol: String,

    /// Number of decimal places for currency
    pub currency_decimals: u8,

    /// Catalog snapshot read at startup
    pub catalog_path: Option<PathBuf>,
}

impl Default for TerminalConfig {
    fn default() -> Self {
        TerminalConfig {
            store_name: "Comanda Dev Store".to_string(),
            origin: OriginMode::Pos,
            table_id: None,
            currency_code: "BRL".to_string(),
            currency_symbol: "R$".to_string(),
            currency_decimals: 2,
            catalog_path: None,
        }
    }
}

impl TerminalConfig {
    /// Loads configuration from file, environment, and defaults.
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading terminal config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load terminal config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.store_name.trim().is_empty() {
            return Err(ConfigError::Invalid("store_name must not be empty".into()));
        }

        if self.currency_decimals > 4 {
            return Err(ConfigError::Invalid(format!(
                "currency_decimals must be at most 4, got: {}",
                self.currency_decimals
            )));
        }

        if self.origin == OriginMode::Waiter {
            self.default_table()?;
        }

        Ok(())
    }

    /// Origin stamped on orders that do not say otherwise.
    pub fn default_origin(&self) -> ConfigResult<OrderOrigin> {
        match self.origin {
            OriginMode::Pos => Ok(OrderOrigin::Pos),
            OriginMode::Waiter => Ok(OrderOrigin::Waiter {
                table_id: self.default_table()?.to_string(),
            }),
        }
    }

    fn default_table(&self) -> ConfigResult<&str> {
        self.table_id
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or(ConfigError::MissingTableId)
    }

    /// Formats a cent amount as a currency string.
    ///
    /// ## Example
    /// ```rust
    /// use comanda_terminal::config::TerminalConfig;
    ///
    /// let config = TerminalConfig::default();
    /// assert_eq!(config.format_currency(4200), "R$42.00");
    /// ```
    pub fn format_currency(&self, cents: i64) -> String {
        let divisor = 10_i64.pow(self.currency_decimals as u32);
        let whole = (cents / divisor).abs();
        let frac = (cents % divisor).abs();
        let sign = if cents < 0 { "-" } else { "" };

        if self.currency_decimals == 0 {
            return format!("{}{}{}", sign, self.currency_symbol, whole);
        }

        format!(
            "{}{}{}.{:0width$}",
            sign,
            self.currency_symbol,
            whole,
            frac,
            width = self.currency_decimals as usize
        )
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies `COMANDA_*` overrides read through `lookup`.
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(name) = lookup("COMANDA_STORE_NAME") {
            self.store_name = name;
        }

        if let Some(origin) = lookup("COMANDA_ORIGIN") {
            match origin.parse() {
                Ok(parsed) => {
                    debug!(origin = %origin, "Overriding origin from environment");
                    self.origin = parsed;
                }
                Err(_) => warn!(origin = %origin, "Unknown origin in environment"),
            }
        }

        if let Some(table) = lookup("COMANDA_TABLE_ID") {
            debug!(table_id = %table, "Overriding table id from environment");
            self.table_id = Some(table);
        }

        if let Some(symbol) = lookup("COMANDA_CURRENCY_SYMBOL") {
            self.currency_symbol = symbol;
        }

        if let Some(path) = lookup("COMANDA_CATALOG_PATH") {
            debug!(path = %path, "Overriding catalog path from environment");
            self.catalog_path = Some(PathBuf::from(path));
        }
    }

    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "comanda", "terminal")
            .map(|dirs| dirs.config_dir().join("terminal.toml"))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
