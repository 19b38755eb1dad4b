//! Configuration management for the `WindSite` application
//!
//! Handles loading configuration from files, environment variables,
//! and provides validation for all configuration settings.

use crate::WindSiteError;
use crate::models::{ExampleLocation, default_example_locations};
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure for the `WindSite` application
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindSiteConfig {
    /// Measurement source configuration
    #[serde(default)]
    pub source: SourceConfig,
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Example locations offered to pre-fill a request
    #[serde(default = "default_example_locations")]
    pub examples: Vec<ExampleLocation>,
}

/// Measurement source settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Base URL of the Open-Meteo API
    #[serde(default = "default_source_base_url")]
    pub base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_source_timeout")]
    pub timeout_seconds: u32,
    /// Fill in simulated directional frequencies, as Open-Meteo has none
    #[serde(default = "default_simulate_directions")]
    pub simulate_directions: bool,
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Port to listen on
    #[serde(default = "default_server_port")]
    pub port: u16,
    /// Directory with the static frontend
    #[serde(default = "default_static_dir")]
    pub static_dir: String,
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

// Default value functions
fn default_source_base_url() -> String {
    "https://api.open-meteo.com/v1".to_string()
}

fn default_source_timeout() -> u32 {
    30
}

fn default_simulate_directions() -> bool {
    true
}

fn default_server_port() -> u16 {
    5001
}

fn default_static_dir() -> String {
    "frontend/dist".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: default_source_base_url(),
            timeout_seconds: default_source_timeout(),
            simulate_directions: default_simulate_directions(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_server_port(),
            static_dir: default_static_dir(),
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

impl Default for WindSiteConfig {
    fn default() -> Self {
        Self {
            source: SourceConfig::default(),
            server: ServerConfig::default(),
            logging: LoggingConfig::default(),
            examples: default_example_locations(),
        }
    }
}

impl WindSiteConfig {
    /// Load configuration from the given file, or the user config file when
    /// `None`, then apply `WINDSITE_` environment overrides
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path().unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // Environment overrides, e.g. WINDSITE_SERVER__PORT=8080
        builder = builder.add_source(
            Environment::with_prefix("WINDSITE")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: WindSiteConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("windsite").join("config.toml"))
    }

    /// Apply default values to empty configuration fields
    pub fn apply_defaults(&mut self) {
        if self.source.base_url.is_empty() {
            self.source.base_url = default_source_base_url();
        }
        if self.source.timeout_seconds == 0 {
            self.source.timeout_seconds = default_source_timeout();
        }
        if self.server.static_dir.is_empty() {
            self.server.static_dir = default_static_dir();
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
        self.validate_examples()?;
        Ok(())
    }

    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.source.timeout_seconds > 300 {
            return Err(
                WindSiteError::config("Measurement source timeout cannot exceed 300 seconds")
                    .into(),
            );
        }

        if self.server.port == 0 {
            return Err(WindSiteError::config("Server port cannot be 0").into());
        }

        Ok(())
    }

    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(WindSiteError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(WindSiteError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        if !self.source.base_url.starts_with("http://")
            && !self.source.base_url.starts_with("https://")
        {
            return Err(WindSiteError::config(
                "Measurement source base URL must be a valid HTTP or HTTPS URL",
            )
            .into());
        }

        Ok(())
    }

    fn validate_examples(&self) -> Result<()> {
        for example in &self.examples {
            example.coordinates().with_context(|| {
                format!("Example location '{}' has invalid coordinates", example.name)
            })?;
        }
        Ok(())
    }
}
