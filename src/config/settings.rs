//! User settings for Moneybags
//!
//! Manages user preferences such as the display currency and the name of the
//! payee that spreadsheet imports are attributed to.

use serde::{Deserialize, Serialize};

use super::paths::MoneybagsPaths;
use crate::error::MoneybagsError;

/// Currency used when displaying amounts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CurrencyFormat {
    #[default]
    Nok,
    Usd,
    Eur,
}

impl CurrencyFormat {
    /// Format an integer amount for display
    pub fn format(&self, amount: i64) -> String {
        match self {
            Self::Nok => format!("{} kr", amount),
            Self::Usd => format!("${}", amount),
            Self::Eur => format!("€{}", amount),
        }
    }
}

impl std::fmt::Display for CurrencyFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Nok => write!(f, "nok"),
            Self::Usd => write!(f, "usd"),
            Self::Eur => write!(f, "eur"),
        }
    }
}

impl std::str::FromStr for CurrencyFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "nok" | "kr" => Ok(Self::Nok),
            "usd" | "$" => Ok(Self::Usd),
            "eur" | "€" => Ok(Self::Eur),
            _ => Err(format!("Unknown currency '{}' (expected nok, usd or eur)", s)),
        }
    }
}

/// Payee that imported transactions are attributed to
pub const DEFAULT_IMPORT_PAYEE: &str = "Import - Google Sheets";

/// User settings for Moneybags
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Display currency
    #[serde(default)]
    pub currency_format: CurrencyFormat,

    /// Name of the synthetic payee used for imported transactions
    #[serde(default = "default_import_payee")]
    pub import_payee_name: String,

    /// How long cached settings stay fresh, in seconds
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,

    /// Whether first-time setup has run
    #[serde(default)]
    pub database_seeded: bool,
}

fn default_schema_version() -> u32 {
    1
}

fn default_import_payee() -> String {
    DEFAULT_IMPORT_PAYEE.to_string()
}

fn default_cache_ttl_secs() -> u64 {
    300
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_format: CurrencyFormat::default(),
            import_payee_name: default_import_payee(),
            cache_ttl_secs: default_cache_ttl_secs(),
            database_seeded: false,
        }
    }
}

impl Settings {
    /// Load settings from disk, or return defaults if the file doesn't exist
    pub fn load_or_create(paths: &MoneybagsPaths) -> Result<Self, MoneybagsError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                MoneybagsError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                MoneybagsError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &MoneybagsPaths) -> Result<(), MoneybagsError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            MoneybagsError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| MoneybagsError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }
}
