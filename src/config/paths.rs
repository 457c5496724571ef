//! Path management for Moneybags
//!
//! Provides XDG-compliant path resolution for configuration and data files.
//!
//! ## Path Resolution Order
//!
//! 1. `MONEYBAGS_DATA_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/moneybags` or `~/.config/moneybags`
//! 3. Windows: `%APPDATA%\moneybags`

use std::path::PathBuf;

use crate::error::MoneybagsError;

/// Environment variable that overrides the base directory
pub const DATA_DIR_ENV: &str = "MONEYBAGS_DATA_DIR";

/// Manages all paths used by Moneybags
#[derive(Debug, Clone)]
pub struct MoneybagsPaths {
    /// Base directory for all Moneybags data
    base_dir: PathBuf,
}

impl MoneybagsPaths {
    /// Create a new MoneybagsPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if no home/appdata directory can be determined.
    pub fn new() -> Result<Self, MoneybagsError> {
        let base_dir = if let Ok(custom) = std::env::var(DATA_DIR_ENV) {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create MoneybagsPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the data directory (<base>/data/)
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the audit log
    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    pub fn categories_file(&self) -> PathBuf {
        self.data_dir().join("categories.json")
    }

    pub fn payees_file(&self) -> PathBuf {
        self.data_dir().join("payees.json")
    }

    pub fn budget_entries_file(&self) -> PathBuf {
        self.data_dir().join("budget_entries.json")
    }

    pub fn templates_file(&self) -> PathBuf {
        self.data_dir().join("budget_templates.json")
    }

    pub fn transactions_file(&self) -> PathBuf {
        self.data_dir().join("transactions.json")
    }

    /// Ensure the base and data directories exist
    pub fn ensure_directories(&self) -> Result<(), MoneybagsError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| MoneybagsError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| MoneybagsError::Io(format!("Failed to create data directory: {}", e)))?;

        Ok(())
    }

    /// Check if Moneybags has been initialized (config file exists)
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

#[cfg(not(windows))]
fn resolve_default_path() -> Result<PathBuf, MoneybagsError> {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        return Ok(PathBuf::from(xdg).join("moneybags"));
    }
    let home = std::env::var("HOME")
        .map_err(|_| MoneybagsError::Config("Could not determine HOME directory".into()))?;
    Ok(PathBuf::from(home).join(".config").join("moneybags"))
}

#[cfg(windows)]
fn resolve_default_path() -> Result<PathBuf, MoneybagsError> {
    let appdata = std::env::var("APPDATA")
        .map_err(|_| MoneybagsError::Config("Could not determine APPDATA directory".into()))?;
    Ok(PathBuf::from(appdata).join("moneybags"))
}
