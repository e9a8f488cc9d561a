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

/// How the startup config was obtained.
#[derive(Debug)]
pub enum ConfigOrigin {
    /// Read from the config file.
    Loaded,
    /// File was missing and defaults were written, unless saving failed.
    Created { save_error: Option<String> },
    /// File was invalid; defaults are used and the file is left alone.
    Defaulted(String),
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
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub table: TableConfig,
    #[serde(default)]
    pub otp: OtpConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Remote API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the auth/staff API (e.g. "http://localhost:3000").
    pub base_url: String,
    /// Request timeout in seconds (default: 30).
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    30
}

/// Staff table preferences.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    pub rows_per_page: usize,
    pub rows_per_page_options: Vec<usize>,
}

/// One-time passcode screen settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OtpConfig {
    /// Seconds before "Resend" becomes available.
    pub resend_cooldown_secs: u32,
}

/// Session token storage.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Token store file. Defaults to `session.json` in the data directory.
    pub token_path: Option<PathBuf>,
}

/// Log output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Write a daily rolling log file in addition to stderr.
    pub file_enabled: bool,
    /// Log directory. Defaults to `logs/` in the data directory.
    pub directory: Option<PathBuf>,
}

/// Platform directories for this application, if the home directory is known.
fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("org", "staff-admin", "staff-admin")
}

/// Directory for runtime data (session token, logs).
pub fn data_dir() -> PathBuf {
    project_dirs()
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

impl AppConfig {
    /// Get config file path in the platform config directory.
    pub fn default_path() -> PathBuf {
        project_dirs()
            .map(|dirs| dirs.config_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."))
            .join("config.toml")
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

    /// Load `path`, writing a default file on first run.
    pub fn load_or_create(path: &Path) -> (Self, ConfigOrigin) {
        match Self::try_load(path) {
            ConfigLoadResult::Loaded(config) => (config, ConfigOrigin::Loaded),
            ConfigLoadResult::Missing => {
                let config = Self::default();
                let save_error = config.save(path).err().map(|e| e.to_string());
                (config, ConfigOrigin::Created { save_error })
            }
            ConfigLoadResult::Invalid(e) => (Self::default(), ConfigOrigin::Defaulted(e.to_string())),
        }
    }

    /// Apply a one-off base URL override. Not persisted.
    pub fn with_api_url(mut self, url: Option<String>) -> Self {
        if let Some(url) = url {
            self.api.base_url = url;
        }
        self
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api.base_url.trim().is_empty() {
            return Err(ConfigError::Validation("API base URL cannot be empty".to_string()));
        }
        if !self.api.base_url.starts_with("http") {
            return Err(ConfigError::Validation(
                "API base URL must start with http:// or https://".to_string(),
            ));
        }
        if self.api.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "API timeout must be greater than 0".to_string(),
            ));
        }
        if self.table.rows_per_page_options.is_empty() {
            return Err(ConfigError::Validation(
                "At least one rows-per-page option is required".to_string(),
            ));
        }
        if self.table.rows_per_page_options.contains(&0) {
            return Err(ConfigError::Validation(
                "Rows-per-page options must be greater than 0".to_string(),
            ));
        }
        if !self.table.rows_per_page_options.contains(&self.table.rows_per_page) {
            return Err(ConfigError::Validation(
                "Rows per page must be one of the rows-per-page options".to_string(),
            ));
        }
        if self.otp.resend_cooldown_secs == 0 {
            return Err(ConfigError::Validation(
                "OTP resend cooldown must be at least 1 second".to_string(),
            ));
        }
        Ok(())
    }

    /// Save configuration to file.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Resolved token store path.
    pub fn token_path(&self) -> PathBuf {
        self.session
            .token_path
            .clone()
            .unwrap_or_else(|| data_dir().join("session.json"))
    }

    /// Resolved log directory.
    pub fn log_dir(&self) -> PathBuf {
        self.logging
            .directory
            .clone()
            .unwrap_or_else(|| data_dir().join("logs"))
    }
}

impl ApiConfig {
    /// Build an absolute endpoint URL from a path like `/api/auth/login`.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{base}{path}", base = self.base_url.trim_end_matches('/'))
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            rows_per_page: 5,
            rows_per_page_options: vec![5, 10, 25],
        }
    }
}

impl Default for OtpConfig {
    fn default() -> Self {
        Self {
            resend_cooldown_secs: 60,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            file_enabled: true,
            directory: None,
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
    fn test_endpoint_joins_without_double_slash() {
        let api = ApiConfig {
            base_url: "http://localhost:3000/".to_string(),
            timeout_secs: 30,
        };
        assert_eq!(api.endpoint("/api/auth/login"), "http://localhost:3000/api/auth/login");
    }

    #[test]
    fn test_validation_empty_base_url() {
        let mut config = AppConfig::default();
        config.api.base_url = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_invalid_base_url() {
        let mut config = AppConfig::default();
        config.api.base_url = "ftp://invalid".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rows_per_page_must_be_an_option() {
        let mut config = AppConfig::default();

        config.table.rows_per_page = 7;
        assert!(config.validate().is_err());

        config.table.rows_per_page = 10;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_zero_cooldown() {
        let mut config = AppConfig::default();
        config.otp.resend_cooldown_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_file_uses_section_defaults() {
        let config: AppConfig = toml::from_str("[api]\nbase_url = \"https://staff.example.org\"\n").unwrap();
        assert_eq!(config.api.base_url, "https://staff.example.org");
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(config.table.rows_per_page, 5);
        assert_eq!(config.otp.resend_cooldown_secs, 60);
    }

    #[test]
    fn test_partial_section_keeps_other_fields() {
        let config: AppConfig = toml::from_str("[table]\nrows_per_page = 10\n").unwrap();
        assert_eq!(config.table.rows_per_page_options, vec![5, 10, 25]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = AppConfig::default();
        config.api.base_url = "http://10.0.0.5:3000".to_string();
        config.save(&path).unwrap();

        match AppConfig::try_load(&path) {
            ConfigLoadResult::Loaded(loaded) => assert_eq!(loaded.api.base_url, "http://10.0.0.5:3000"),
            other => panic!("expected loaded config, got {other:?}"),
        }
    }

    #[test]
    fn test_first_run_writes_defaults_without_override() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let (config, origin) = AppConfig::load_or_create(&path);
        assert!(matches!(origin, ConfigOrigin::Created { save_error: None }));

        let config = config.with_api_url(Some("ftp://not-an-api".to_string()));
        assert!(config.validate().is_err());

        match AppConfig::try_load(&path) {
            ConfigLoadResult::Loaded(saved) => assert_eq!(saved.api.base_url, "http://localhost:3000"),
            other => panic!("expected saved defaults, got {other:?}"),
        }
    }

    #[test]
    fn test_invalid_file_is_not_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[otp]\nresend_cooldown_secs = 0\n").unwrap();

        let (config, origin) = AppConfig::load_or_create(&path);
        assert!(matches!(origin, ConfigOrigin::Defaulted(_)));
        assert_eq!(config.otp.resend_cooldown_secs, 60);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "[otp]\nresend_cooldown_secs = 0\n");
    }

    #[test]
    fn test_try_load_missing_and_invalid() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        assert!(matches!(AppConfig::try_load(&path), ConfigLoadResult::Missing));

        std::fs::write(&path, "[otp]\nresend_cooldown_secs = 0\n").unwrap();
        assert!(matches!(AppConfig::try_load(&path), ConfigLoadResult::Invalid(_)));
    }
}
