//! Configuration management module.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration load result.
#[derive(Debug)]
pub enum ConfigLoadResult {
    /// Config loaded successfully.
    Loaded(AppConfig),
    /// Config file missing (first run).
    Missing,
    /// Config file exists but invalid.
    Invalid(ConfigError),
}

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Read(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Validation failed: {0}")]
    Validation(String),
}

/// Main application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub service: ServiceConfig,
    #[serde(default)]
    pub scan: ScanConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

/// Remote guest-list service settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceConfig {
    pub base_url: String,
    /// Per-request timeout in seconds (default: 10).
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    10
}

/// Scan flow timing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanConfig {
    /// How long a closed verdict stays on screen before it is cleared.
    #[serde(default = "default_dismiss_delay_ms")]
    pub dismiss_delay_ms: u64,
}

fn default_dismiss_delay_ms() -> u64 {
    500
}

/// Window preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiConfig {
    pub window_width: f32,
    pub window_height: f32,
}

impl AppConfig {
    /// Get config file path in the platform config directory.
    ///
    /// Falls back to the executable's directory when no home directory is known.
    pub fn default_path() -> PathBuf {
        match ProjectDirs::from("org", "peer2peer", "guest-checkin") {
            Some(dirs) => dirs.config_dir().join("config.toml"),
            None => std::env::current_exe()
                .ok()
                .and_then(|p| p.parent().map(|p| p.to_path_buf()))
                .unwrap_or_else(|| PathBuf::from("."))
                .join("config.toml"),
        }
    }

    /// Directory for rolling log files.
    pub fn log_dir() -> PathBuf {
        match ProjectDirs::from("org", "peer2peer", "guest-checkin") {
            Some(dirs) => dirs.data_local_dir().join("logs"),
            None => PathBuf::from("logs"),
        }
    }

    /// Attempt to load config with detailed result.
    pub fn try_load(path: &Path) -> ConfigLoadResult {
        if !path.exists() {
            return ConfigLoadResult::Missing;
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str::<AppConfig>(&content) {
                Ok(config) => match config.validate() {
                    Ok(()) => ConfigLoadResult::Loaded(config),
                    Err(e) => ConfigLoadResult::Invalid(e),
                },
                Err(e) => ConfigLoadResult::Invalid(ConfigError::Parse(e)),
            },
            Err(e) => ConfigLoadResult::Invalid(ConfigError::Read(e)),
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = self.service.base_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::Validation(
                "Service URL must start with http:// or https://".to_string(),
            ));
        }
        if self.service.timeout_secs == 0 || self.service.timeout_secs > 120 {
            return Err(ConfigError::Validation(
                "Request timeout must be between 1 and 120 seconds".to_string(),
            ));
        }
        if self.scan.dismiss_delay_ms > 5000 {
            return Err(ConfigError::Validation(
                "Dismiss delay cannot exceed 5000 ms".to_string(),
            ));
        }
        if self.ui.window_width < 200.0 || self.ui.window_height < 200.0 {
            return Err(ConfigError::Validation(
                "Window size must be at least 200x200".to_string(),
            ));
        }
        Ok(())
    }

    /// Save configuration to file, creating the parent directory if needed.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }
}

impl ServiceConfig {
    /// Base URL without a trailing slash.
    pub fn base(&self) -> &str {
        self.base_url.trim().trim_end_matches('/')
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: "https://peer2peer.altervista.org".to_string(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            dismiss_delay_ms: default_dismiss_delay_ms(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            window_width: 480.0,
            window_height: 800.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_validates() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_base_strips_trailing_slash() {
        let service = ServiceConfig {
            base_url: "https://example.org/".to_string(),
            timeout_secs: 10,
        };
        assert_eq!(service.base(), "https://example.org");
    }

    #[test]
    fn test_validation_invalid_service_url() {
        let mut config = AppConfig::default();
        config.service.base_url = "ftp://invalid".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_timeout_bounds() {
        let mut config = AppConfig::default();

        config.service.timeout_secs = 0;
        assert!(config.validate().is_err());

        config.service.timeout_secs = 121;
        assert!(config.validate().is_err());

        config.service.timeout_secs = 30;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_dismiss_delay() {
        let mut config = AppConfig::default();
        config.scan.dismiss_delay_ms = 10_000;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: AppConfig = toml::from_str("[service]\nbase_url = \"http://localhost:8080\"\n").unwrap();
        assert_eq!(config.service.base_url, "http://localhost:8080");
        assert_eq!(config.service.timeout_secs, 10);
        assert_eq!(config.scan.dismiss_delay_ms, 500);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_save_and_load() {
        let dir = std::env::temp_dir().join(format!("guest-checkin-test-{}", std::process::id()));
        let path = dir.join("config.toml");

        let mut config = AppConfig::default();
        config.service.timeout_secs = 25;
        config.save(&path).unwrap();

        match AppConfig::try_load(&path) {
            ConfigLoadResult::Loaded(loaded) => assert_eq!(loaded, config),
            other => panic!("expected loaded config, got {other:?}"),
        }

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_missing_file() {
        let path = std::env::temp_dir().join("guest-checkin-does-not-exist.toml");
        assert!(matches!(AppConfig::try_load(&path), ConfigLoadResult::Missing));
    }
}
