//! # Configuration
//!
//! Application configuration loading and management.
//!
//! This module provides configuration structures and loading mechanisms
//! for the booking engine service, supporting both environment variables
//! and configuration files.
//!
//! # Configuration Sources
//!
//! Configuration is loaded in the following order (later sources override earlier):
//! 1. Default values
//! 2. Configuration file (if exists)
//! 3. Environment variables (prefixed with `BOOKING_`)
//!
//! # Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `BOOKING_REST_HOST` | REST server host | `0.0.0.0` |
//! | `BOOKING_REST_PORT` | REST server port | `8080` |
//! | `BOOKING_LOG_LEVEL` | Log level | `info` |
//! | `BOOKING_LOG_FORMAT` | Log format (json/pretty) | `json` |
//! | `BOOKING_CANCEL_LEAD_SECS` | Cancellation lead time | `7200` |
//! | `BOOKING_RESCHEDULE_LEAD_SECS` | Reschedule lead time | `14400` |
//!
//! # Examples
//!
//! ```ignore
//! use booking_engine::config::AppConfig;
//!
//! let config = AppConfig::load()?;
//! println!("REST server: {}:{}", config.rest.host, config.rest.port);
//! ```

use crate::domain::policy::cancellation::{
    CancellationPolicy, DEFAULT_CANCEL_LEAD_SECS, DEFAULT_RESCHEDULE_LEAD_SECS,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;
use thiserror::Error;

// ============================================================================
// Configuration Errors
// ============================================================================

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse configuration.
    #[error("failed to parse config: {0}")]
    Parse(String),

    /// Invalid configuration value.
    #[error("invalid config value for {field}: {message}")]
    InvalidValue {
        /// Field name.
        field: String,
        /// Error message.
        message: String,
    },
}

// ============================================================================
// Server Configuration
// ============================================================================

/// REST/HTTP server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestConfig {
    /// Server host address.
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port.
    #[serde(default = "default_rest_port")]
    pub port: u16,

    /// Request timeout in seconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Enable CORS.
    #[serde(default = "default_true")]
    pub enable_cors: bool,
}

impl Default for RestConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_rest_port(),
            request_timeout_secs: default_request_timeout(),
            enable_cors: true,
        }
    }
}

impl RestConfig {
    /// Returns the socket address for the REST server.
    ///
    /// # Errors
    ///
    /// Returns an error if the address cannot be parsed.
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| ConfigError::InvalidValue {
                field: "rest.host:port".to_string(),
                message: format!("{e}"),
            })
    }
}

// ============================================================================
// Logging Configuration
// ============================================================================

/// Log format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// JSON format (structured logging).
    #[default]
    Json,
    /// Pretty format (human-readable).
    Pretty,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format.
    #[serde(default)]
    pub format: LogFormat,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::Json,
        }
    }
}

// ============================================================================
// Policy Configuration
// ============================================================================

/// Cancellation/reschedule window configuration.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PolicyConfig {
    /// Minimum lead time for cancellation, in seconds.
    #[serde(default = "default_cancel_lead")]
    pub cancel_lead_secs: i64,

    /// Minimum lead time for rescheduling, in seconds.
    #[serde(default = "default_reschedule_lead")]
    pub reschedule_lead_secs: i64,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            cancel_lead_secs: default_cancel_lead(),
            reschedule_lead_secs: default_reschedule_lead(),
        }
    }
}

impl PolicyConfig {
    /// Builds the domain policy evaluator from this configuration.
    #[must_use]
    pub const fn to_policy(self) -> CancellationPolicy {
        CancellationPolicy::new(self.cancel_lead_secs, self.reschedule_lead_secs)
    }
}

// ============================================================================
// Application Configuration
// ============================================================================

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// REST server configuration.
    #[serde(default)]
    pub rest: RestConfig,

    /// Logging configuration.
    #[serde(default)]
    pub log: LogConfig,

    /// Cancellation/reschedule policy configuration.
    #[serde(default)]
    pub policy: PolicyConfig,

    /// Service name for tracing.
    #[serde(default = "default_service_name")]
    pub service_name: String,
}

impl AppConfig {
    /// Loads configuration from environment variables and optional config file.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading fails.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Try to load from config file if it exists
        let config_path =
            std::env::var("BOOKING_CONFIG_FILE").unwrap_or_else(|_| "config.toml".to_string());

        if Path::new(&config_path).exists() {
            config = Self::from_file(&config_path)?;
        }

        // Override with environment variables
        config.apply_env_overrides();

        Ok(config)
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Applies environment variable overrides to the configuration.
    fn apply_env_overrides(&mut self) {
        // REST configuration
        if let Ok(host) = std::env::var("BOOKING_REST_HOST") {
            self.rest.host = host;
        }
        if let Ok(port) = std::env::var("BOOKING_REST_PORT")
            && let Ok(p) = port.parse()
        {
            self.rest.port = p;
        }

        // Logging configuration
        if let Ok(level) = std::env::var("BOOKING_LOG_LEVEL") {
            self.log.level = level;
        }
        if let Ok(format) = std::env::var("BOOKING_LOG_FORMAT") {
            self.log.format = match format.to_lowercase().as_str() {
                "pretty" => LogFormat::Pretty,
                _ => LogFormat::Json,
            };
        }

        // Policy configuration
        if let Ok(lead) = std::env::var("BOOKING_CANCEL_LEAD_SECS")
            && let Ok(secs) = lead.parse()
        {
            self.policy.cancel_lead_secs = secs;
        }
        if let Ok(lead) = std::env::var("BOOKING_RESCHEDULE_LEAD_SECS")
            && let Ok(secs) = lead.parse()
        {
            self.policy.reschedule_lead_secs = secs;
        }

        // Service configuration
        if let Ok(name) = std::env::var("BOOKING_SERVICE_NAME") {
            self.service_name = name;
        }
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        // Validate REST address
        self.rest.socket_addr()?;

        // Validate log level
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log.level.to_lowercase().as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "log.level".to_string(),
                message: format!(
                    "invalid log level '{}', must be one of: {:?}",
                    self.log.level, valid_levels
                ),
            });
        }

        // Validate policy windows
        if self.policy.cancel_lead_secs < 0 {
            return Err(ConfigError::InvalidValue {
                field: "policy.cancel_lead_secs".to_string(),
                message: "lead time must be non-negative".to_string(),
            });
        }
        if self.policy.reschedule_lead_secs < self.policy.cancel_lead_secs {
            return Err(ConfigError::InvalidValue {
                field: "policy.reschedule_lead_secs".to_string(),
                message: "reschedule lead must not be shorter than cancellation lead".to_string(),
            });
        }

        Ok(())
    }
}

// ============================================================================
// Default Value Functions
// ============================================================================

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_rest_port() -> u16 {
    8080
}

fn default_request_timeout() -> u64 {
    30
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_cancel_lead() -> i64 {
    DEFAULT_CANCEL_LEAD_SECS
}

fn default_reschedule_lead() -> i64 {
    DEFAULT_RESCHEDULE_LEAD_SECS
}

fn default_service_name() -> String {
    "booking-engine".to_string()
}
