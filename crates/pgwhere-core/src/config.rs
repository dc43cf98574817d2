//! `pgwhere` Configuration Module
//!
//! Provides configuration file support via `pgwhere.toml`, environment variables,
//! and runtime overrides.
//!
//! # Priority (highest to lowest)
//!
//! 1. Runtime overrides (builder methods, CLI flags)
//! 2. Environment variables (`PGWHERE_*`, sections split on `__`, e.g.
//!    `PGWHERE_LIMITS__MAX_DEPTH=16`)
//! 3. Configuration file (`pgwhere.toml`)
//! 4. Default values

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::detect::{lookup_hint, TypeHint};
use crate::field_path::DEFAULT_COLUMN;
use crate::sql::PlaceholderStyle;

/// Default configuration file name.
pub const CONFIG_FILE: &str = "pgwhere.toml";

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to parse configuration file.
    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    /// Invalid configuration value.
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue {
        /// Configuration key that failed validation.
        key: String,
        /// Validation error message.
        message: String,
    },
}

/// Document column section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentConfig {
    /// JSONB column holding the document.
    pub column: String,
    /// `false` switches to typed-column mode: the first key is a real column.
    pub jsonb: bool,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            column: DEFAULT_COLUMN.to_string(),
            jsonb: true,
        }
    }
}

/// SQL rendering section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SqlConfig {
    /// Placeholder spelling.
    pub placeholder: PlaceholderStyle,
}

/// Complexity limits section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Maximum nesting depth of the filter tree.
    pub max_depth: usize,
    /// Maximum number of operator conditions.
    pub max_conditions: usize,
    /// Maximum length of any list value.
    pub max_list_len: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_depth: 32,
            max_conditions: 512,
            max_list_len: 1000,
        }
    }
}

/// Logging configuration section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: error, warn, info, debug, trace.
    pub level: String,
    /// Log format: text or json.
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "text".to_string(),
        }
    }
}

/// Main `pgwhere` configuration structure.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CompilerConfig {
    /// Document column configuration.
    pub document: DocumentConfig,
    /// SQL rendering configuration.
    pub sql: SqlConfig,
    /// Complexity limits.
    pub limits: LimitsConfig,
    /// Logging configuration.
    pub logging: LoggingConfig,
    /// Static type hints keyed by dotted path or leaf field name.
    pub hints: IndexMap<String, TypeHint>,
}

impl CompilerConfig {
    /// Loads configuration from default sources.
    ///
    /// Priority: defaults < file < environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration parsing fails.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from_path(CONFIG_FILE)
    }

    /// Loads configuration from a specific file path.
    ///
    /// A missing file is not an error; defaults and environment still apply.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration parsing fails.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let figment = Figment::new()
            .merge(Serialized::defaults(Self::default()))
            .merge(Toml::file(path.as_ref()))
            .merge(Env::prefixed("PGWHERE_").split("__"));

        figment
            .extract()
            .map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Creates a configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if parsing fails.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let figment = Figment::new()
            .merge(Serialized::defaults(Self::default()))
            .merge(Toml::string(toml_str));

        figment
            .extract()
            .map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.document.column.is_empty() || self.document.column.contains('\0') {
            return Err(ConfigError::InvalidValue {
                key: "document.column".to_string(),
                message: "must be a non-empty identifier without NUL".to_string(),
            });
        }

        let limits = [
            ("limits.max_depth", self.limits.max_depth, 256),
            ("limits.max_conditions", self.limits.max_conditions, usize::MAX),
            ("limits.max_list_len", self.limits.max_list_len, usize::MAX),
        ];
        for (key, value, max) in limits {
            if value == 0 || value > max {
                let message = if max == usize::MAX {
                    format!("value {value} must be >= 1")
                } else {
                    format!("value {value} is out of range [1, {max}]")
                };
                return Err(ConfigError::InvalidValue {
                    key: key.to_string(),
                    message,
                });
            }
        }

        let valid_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            return Err(ConfigError::InvalidValue {
                key: "logging.level".to_string(),
                message: format!(
                    "value '{}' is invalid, expected one of: {:?}",
                    self.logging.level, valid_levels
                ),
            });
        }

        let valid_formats = ["text", "json"];
        if !valid_formats.contains(&self.logging.format.as_str()) {
            return Err(ConfigError::InvalidValue {
                key: "logging.format".to_string(),
                message: format!(
                    "value '{}' is invalid, expected one of: {:?}",
                    self.logging.format, valid_formats
                ),
            });
        }

        Ok(())
    }

    /// Looks up a hint by dotted path, then by leaf name.
    #[must_use]
    pub fn hint_for(&self, dotted: &str) -> Option<TypeHint> {
        lookup_hint(&self.hints, dotted)
    }

    /// Serializes the configuration to TOML.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError(e.to_string()))
    }
}
