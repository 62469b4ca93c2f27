//! TOML Configuration File Support
//!
//! Centralized configuration loading, supporting a TOML configuration file at
//! `~/.config/docchat/docchat.toml`.
//!
//! # Configuration Priority
//!
//! Configuration values are loaded with the following priority (highest first):
//! 1. CLI arguments (when applicable)
//! 2. Environment variables
//! 3. TOML configuration file
//! 4. Default values
//!
//! # XDG Base Directory Compliance
//!
//! The configuration file follows XDG Base Directory specification:
//! - `$XDG_CONFIG_HOME/docchat/docchat.toml` (typically `~/.config/docchat/docchat.toml`)
//!
//! # Example Configuration
//!
//! ```toml
//! [backend]
//! base_url = "http://localhost:8000"
//! request_timeout_secs = 120
//! upload_timeout_secs = 300
//! health_check_on_start = true
//!
//! [limits]
//! max_question_chars = 8192
//! ```

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// =============================================================================
// Error Types
// =============================================================================

/// Errors that can occur when loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file at {path}: {source}")]
    ReadError {
        /// The path that was attempted
        path: PathBuf,
        /// The underlying IO error
        source: std::io::Error,
    },

    /// Failed to parse TOML
    #[error("Failed to parse TOML config: {0}")]
    ParseError(#[from] toml::de::Error),
}

// =============================================================================
// Configuration Source Tracking
// =============================================================================

/// Tracks where a configuration value came from
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Value from command-line argument
    Cli,
    /// Value from environment variable
    Env,
    /// Value from TOML configuration file
    File,
    /// Default value
    Default,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cli => write!(f, "CLI"),
            Self::Env => write!(f, "environment"),
            Self::File => write!(f, "config file"),
            Self::Default => write!(f, "default"),
        }
    }
}

// =============================================================================
// TOML Configuration Structures
// =============================================================================

/// Backend section of the TOML configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendToml {
    /// Server base URL
    pub base_url: Option<String>,

    /// Timeout for ask and health-check requests, in seconds
    pub request_timeout_secs: Option<u64>,

    /// Timeout for upload requests, in seconds
    pub upload_timeout_secs: Option<u64>,

    /// Whether to probe the backend on startup
    pub health_check_on_start: Option<bool>,
}

/// Limits section of the TOML configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsToml {
    /// Maximum question length in characters
    pub max_question_chars: Option<usize>,
}

/// Top-level TOML configuration structure
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DocChatToml {
    /// Backend configuration section
    pub backend: BackendToml,

    /// Limits configuration section
    pub limits: LimitsToml,
}

// =============================================================================
// Main Configuration Struct
// =============================================================================

/// Centralized application configuration
///
/// This struct consolidates all configuration from multiple sources and tracks
/// where each value came from. Use [`load_config`] to load configuration with
/// proper priority handling.
#[derive(Clone, Debug)]
pub struct DocChatConfig {
    /// Server base URL
    pub base_url: String,

    /// Timeout for ask and health-check requests
    pub request_timeout: Duration,

    /// Timeout for upload requests (file payloads need more time)
    pub upload_timeout: Duration,

    /// Whether to probe the backend on startup
    pub health_check_on_start: bool,

    /// Maximum question length in characters
    pub max_question_chars: usize,

    /// Path to the config file that was loaded (if any)
    pub config_file_path: Option<PathBuf>,

    /// Source of configuration values
    source: ConfigSource,
}

impl Default for DocChatConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            request_timeout: Duration::from_secs(120),
            upload_timeout: Duration::from_secs(300),
            health_check_on_start: true,
            max_question_chars: 8192,
            config_file_path: None,
            source: ConfigSource::Default,
        }
    }
}

impl DocChatConfig {
    /// Create a new configuration with default values
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the primary source of this configuration
    #[must_use]
    pub fn source(&self) -> ConfigSource {
        self.source
    }

    /// Set the configuration source
    pub fn set_source(&mut self, source: ConfigSource) {
        self.source = source;
    }
}

// =============================================================================
// Configuration Loading
// =============================================================================

/// Get the default configuration file path
///
/// Returns `$XDG_CONFIG_HOME/docchat/docchat.toml` or
/// `~/.config/docchat/docchat.toml` if `XDG_CONFIG_HOME` is not set.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("docchat").join("docchat.toml"))
}

/// Load configuration from all sources with proper priority
///
/// Priority order (highest first):
/// 1. CLI arguments (not handled here - caller should apply after)
/// 2. Environment variables
/// 3. TOML configuration file
/// 4. Default values
///
/// # Errors
///
/// Returns an error if the config file exists but cannot be parsed.
/// A missing config file is not an error (defaults are used).
pub fn load_config() -> Result<DocChatConfig, ConfigError> {
    load_config_from_path(default_config_path())
}

/// Load configuration from a specific path
///
/// # Arguments
///
/// * `path` - Optional path to the configuration file. If `None`, only defaults
///   and environment variables are used.
///
/// # Errors
///
/// Returns an error if the specified config file cannot be read or parsed.
pub fn load_config_from_path(path: Option<PathBuf>) -> Result<DocChatConfig, ConfigError> {
    // Start with defaults
    let mut config = DocChatConfig::default();

    // Try to load from file
    if let Some(ref config_path) = path {
        if config_path.exists() {
            let toml_content =
                std::fs::read_to_string(config_path).map_err(|e| ConfigError::ReadError {
                    path: config_path.clone(),
                    source: e,
                })?;

            let toml_config: DocChatToml = toml::from_str(&toml_content)?;
            apply_toml_config(&mut config, &toml_config);
            config.config_file_path = Some(config_path.clone());
            config.source = ConfigSource::File;

            tracing::info!(
                path = %config_path.display(),
                "Loaded configuration from file"
            );
        } else {
            tracing::debug!(
                path = %config_path.display(),
                "Config file not found, using defaults"
            );
        }
    }

    // Apply environment variables (overrides file values)
    apply_env_config(&mut config);

    Ok(config)
}

/// Apply TOML configuration values to the config struct
fn apply_toml_config(config: &mut DocChatConfig, toml: &DocChatToml) {
    if let Some(ref url) = toml.backend.base_url {
        config.base_url = url.clone();
    }
    if let Some(secs) = toml.backend.request_timeout_secs {
        config.request_timeout = Duration::from_secs(secs);
    }
    if let Some(secs) = toml.backend.upload_timeout_secs {
        config.upload_timeout = Duration::from_secs(secs);
    }
    if let Some(enabled) = toml.backend.health_check_on_start {
        config.health_check_on_start = enabled;
    }
    if let Some(chars) = toml.limits.max_question_chars {
        config.max_question_chars = chars;
    }
}

/// Apply environment variable overrides to the config
fn apply_env_config(config: &mut DocChatConfig) {
    if let Ok(url) = std::env::var("DOCCHAT_BASE_URL") {
        config.base_url = url;
        config.source = ConfigSource::Env;
    }
    if let Ok(secs) = std::env::var("DOCCHAT_REQUEST_TIMEOUT_SECS") {
        if let Ok(s) = secs.parse::<u64>() {
            config.request_timeout = Duration::from_secs(s);
            config.source = ConfigSource::Env;
        }
    }
    if let Ok(secs) = std::env::var("DOCCHAT_UPLOAD_TIMEOUT_SECS") {
        if let Ok(s) = secs.parse::<u64>() {
            config.upload_timeout = Duration::from_secs(s);
            config.source = ConfigSource::Env;
        }
    }
    if let Ok(enabled) = std::env::var("DOCCHAT_HEALTH_CHECK") {
        let enabled = enabled != "0" && enabled.to_lowercase() != "false";
        config.health_check_on_start = enabled;
        config.source = ConfigSource::Env;
    }
    if let Ok(chars) = std::env::var("DOCCHAT_MAX_QUESTION_CHARS") {
        if let Ok(c) = chars.parse::<usize>() {
            config.max_question_chars = c;
            config.source = ConfigSource::Env;
        }
    }
}

// =============================================================================
// CLI Override Support
// =============================================================================

/// Builder for applying CLI overrides to configuration
///
/// Use this after [`load_config`] to apply command-line argument overrides.
#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    /// Base URL override
    pub base_url: Option<String>,

    /// Request timeout override (seconds)
    pub request_timeout_secs: Option<u64>,

    /// Upload timeout override (seconds)
    pub upload_timeout_secs: Option<u64>,

    /// Startup health-check override
    pub health_check_on_start: Option<bool>,
}

impl ConfigOverrides {
    /// Create a new empty set of overrides
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set base URL override
    #[must_use]
    pub fn with_base_url(mut self, url: String) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Set request timeout override
    #[must_use]
    pub fn with_request_timeout_secs(mut self, secs: u64) -> Self {
        self.request_timeout_secs = Some(secs);
        self
    }

    /// Set upload timeout override
    #[must_use]
    pub fn with_upload_timeout_secs(mut self, secs: u64) -> Self {
        self.upload_timeout_secs = Some(secs);
        self
    }

    /// Set startup health-check override
    #[must_use]
    pub fn with_health_check_on_start(mut self, enabled: bool) -> Self {
        self.health_check_on_start = Some(enabled);
        self
    }

    /// Apply overrides to a configuration
    pub fn apply(&self, config: &mut DocChatConfig) {
        if self.base_url.is_some()
            || self.request_timeout_secs.is_some()
            || self.upload_timeout_secs.is_some()
            || self.health_check_on_start.is_some()
        {
            config.source = ConfigSource::Cli;
        }

        if let Some(ref url) = self.base_url {
            config.base_url = url.clone();
        }
        if let Some(secs) = self.request_timeout_secs {
            config.request_timeout = Duration::from_secs(secs);
        }
        if let Some(secs) = self.upload_timeout_secs {
            config.upload_timeout = Duration::from_secs(secs);
        }
        if let Some(enabled) = self.health_check_on_start {
            config.health_check_on_start = enabled;
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
