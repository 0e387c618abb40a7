//! User settings for Moneyplan
//!
//! Manages user preferences including the default currency for new accounts
//! and the date format used in output.

use serde::{Deserialize, Serialize};

use super::paths::MoneyplanPaths;
use crate::error::MoneyplanError;
use crate::models::Currency;

/// User settings for Moneyplan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency assigned to new accounts when none is given
    #[serde(default)]
    pub default_currency: Currency,

    /// Date format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            default_currency: Currency::default(),
            date_format: default_date_format(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &MoneyplanPaths) -> Result<Self, MoneyplanError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                MoneyplanError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                MoneyplanError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Create default settings
            let settings = Settings::default();
            // Don't save yet - let caller decide when to persist
            Ok(settings)
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &MoneyplanPaths) -> Result<(), MoneyplanError> {
        // Ensure the config directory exists
        paths.ensure_directories()?;

        let settings_path = paths.settings_file();
        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            MoneyplanError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(&settings_path, contents).map_err(|e| {
            MoneyplanError::Io(format!("Failed to write settings file: {}", e))
        })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.schema_version, 1);
        assert_eq!(settings.default_currency, Currency::Usd);
        assert_eq!(settings.date_format, "%Y-%m-%d");
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = MoneyplanPaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        settings.default_currency = Currency::Inr;

        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.default_currency, Currency::Inr);
    }

    #[test]
    fn test_load_or_create_without_file() {
        let temp_dir = TempDir::new().unwrap();
        let paths = MoneyplanPaths::with_base_dir(temp_dir.path().to_path_buf());

        let settings = Settings::load_or_create(&paths).unwrap();
        assert_eq!(settings.default_currency, Currency::Usd);
        // Nothing persisted until the caller saves
        assert!(!paths.settings_file().exists());
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let settings: Settings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings.schema_version, 1);
        assert_eq!(settings.default_currency, Currency::Usd);
        assert_eq!(settings.date_format, "%Y-%m-%d");
    }
}
