//! Path management for Moneyplan
//!
//! Provides platform-appropriate path resolution for configuration and data.
//!
//! ## Path Resolution Order
//!
//! 1. `MONEYPLAN_DATA_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/moneyplan` or `~/.config/moneyplan`
//! 3. Windows: `%APPDATA%\moneyplan`

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::error::MoneyplanError;

/// Manages all paths used by Moneyplan
#[derive(Debug, Clone)]
pub struct MoneyplanPaths {
    /// Base directory for all Moneyplan data
    base_dir: PathBuf,
}

impl MoneyplanPaths {
    /// Create a new MoneyplanPaths instance
    ///
    /// Path resolution:
    /// 1. `MONEYPLAN_DATA_DIR` env var (explicit override)
    /// 2. Platform config directory via `directories::ProjectDirs`
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, MoneyplanError> {
        let base_dir = if let Ok(custom) = std::env::var("MONEYPLAN_DATA_DIR") {
            PathBuf::from(custom)
        } else {
            let dirs = ProjectDirs::from("", "", "moneyplan").ok_or_else(|| {
                MoneyplanError::Config("Could not determine home directory".into())
            })?;
            dirs.config_dir().to_path_buf()
        };

        Ok(Self { base_dir })
    }

    /// Create MoneyplanPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory (~/.config/moneyplan/ or equivalent)
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the data directory (~/.config/moneyplan/data/)
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

    /// Get the path to users.json
    pub fn users_file(&self) -> PathBuf {
        self.data_dir().join("users.json")
    }

    /// Get the path to plans.json
    pub fn plans_file(&self) -> PathBuf {
        self.data_dir().join("plans.json")
    }

    /// Get the path to session.json
    pub fn session_file(&self) -> PathBuf {
        self.data_dir().join("session.json")
    }

    /// Ensure all required directories exist
    ///
    /// Creates:
    /// - Base directory (~/.config/moneyplan/)
    /// - Data directory (~/.config/moneyplan/data/)
    pub fn ensure_directories(&self) -> Result<(), MoneyplanError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| MoneyplanError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| MoneyplanError::Io(format!("Failed to create data directory: {}", e)))?;

        Ok(())
    }
}
