//! Configuration management for `SustainEarth`
//!
//! Handles loading configuration from files, environment variables,
//! and provides validation for all configuration settings.

use crate::SustainEarthError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure for `SustainEarth`
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SustainEarthConfig {
    /// AQI endpoint configuration
    #[serde(default)]
    pub aqi: AqiConfig,
    /// HTTP API server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// AQI endpoint settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AqiConfig {
    /// Base URL of the AQI endpoint; queried as `{base_url}/?city=...`
    #[serde(default = "default_aqi_base_url")]
    pub base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_aqi_timeout")]
    pub timeout_seconds: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_server_host")]
    pub host: String,
    #[serde(default = "default_server_port")]
    pub port: u16,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_aqi_base_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_aqi_timeout() -> u32 {
    10
}

fn default_server_host() -> String {
    "0.0.0.0".to_string()
}

fn default_server_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for AqiConfig {
    fn default() -> Self {
        Self {
            base_url: default_aqi_base_url(),
            timeout_seconds: default_aqi_timeout(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_server_host(),
            port: default_server_port(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl SustainEarthConfig {
    /// Load configuration from the default file location and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_file = config_path.or_else(Self::get_config_path);

        if let Some(config_file) = config_file {
            builder = builder.add_source(
                File::from(config_file)
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // SUSTAINEARTH_AQI__BASE_URL -> aqi.base_url
        builder = builder.add_source(
            Environment::with_prefix("SUSTAINEARTH")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: SustainEarthConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("sustainearth").join("config.toml"))
    }

    /// Replace empty strings and zero values left by partial sources
    pub fn apply_defaults(&mut self) {
        if self.aqi.base_url.is_empty() {
            self.aqi.base_url = default_aqi_base_url();
        }
        if self.aqi.timeout_seconds == 0 {
            self.aqi.timeout_seconds = default_aqi_timeout();
        }
        if self.server.host.is_empty() {
            self.server.host = default_server_host();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.aqi.timeout_seconds == 0 || self.aqi.timeout_seconds > 300 {
            return Err(SustainEarthError::config(
                "AQI timeout must be between 1 and 300 seconds",
            )
            .into());
        }

        if self.server.port == 0 {
            return Err(SustainEarthError::config("Server port cannot be 0").into());
        }

        Ok(())
    }

    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(SustainEarthError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(SustainEarthError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        if !self.aqi.base_url.starts_with("http://") && !self.aqi.base_url.starts_with("https://")
        {
            return Err(SustainEarthError::config(
                "AQI base URL must be a valid HTTP or HTTPS URL",
            )
            .into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = SustainEarthConfig::default();
        assert_eq!(config.aqi.base_url, "http://localhost:5000");
        assert_eq!(config.aqi.timeout_seconds, 10);
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, "pretty");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation_invalid_log_level() {
        let mut config = SustainEarthConfig::default();
        config.logging.level = "verbose".to_string();
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Invalid log level"));
    }

    #[test]
    fn test_config_validation_numeric_ranges() {
        let mut config = SustainEarthConfig::default();
        config.aqi.timeout_seconds = 500;
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("between 1 and 300"));
    }

    #[test]
    fn test_config_validation_base_url_scheme() {
        let mut config = SustainEarthConfig::default();
        config.aqi.base_url = "ftp://example.org".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_apply_defaults_fills_blanks() {
        let mut config = SustainEarthConfig::default();
        config.aqi.base_url.clear();
        config.aqi.timeout_seconds = 0;
        config.logging.format.clear();
        config.apply_defaults();
        assert_eq!(config.aqi.base_url, "http://localhost:5000");
        assert_eq!(config.aqi.timeout_seconds, 10);
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_load_from_toml_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[aqi]\nbase_url = \"https://aqi.example.org\"\ntimeout_seconds = 5\n\n[server]\nport = 9000"
        )
        .unwrap();

        let config = SustainEarthConfig::load_from_path(Some(file.path().to_path_buf())).unwrap();
        assert_eq!(config.aqi.base_url, "https://aqi.example.org");
        assert_eq!(config.aqi.timeout_seconds, 5);
        assert_eq!(config.server.port, 9000);
        // untouched sections keep their defaults
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_load_from_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        let config = SustainEarthConfig::load_from_path(Some(path)).unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
    }

    #[test]
    fn test_shipped_default_file_matches_defaults() {
        let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("config/default.toml");
        let config = SustainEarthConfig::load_from_path(Some(path)).unwrap();
        let defaults = SustainEarthConfig::default();
        assert_eq!(config.aqi.base_url, defaults.aqi.base_url);
        assert_eq!(config.server.port, defaults.server.port);
        assert_eq!(config.logging.format, defaults.logging.format);
    }

    #[test]
    fn test_config_path_generation() {
        if let Some(path) = SustainEarthConfig::get_config_path() {
            assert!(path.to_string_lossy().contains("sustainearth"));
            assert!(path.to_string_lossy().ends_with("config.toml"));
        }
    }
}
