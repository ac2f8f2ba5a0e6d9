//! Registry configuration
//!
//! Defaults reproduce the reference naming rules: primary key `id`, shadow
//! table suffix `_delete`, soft-delete column named after its field.

use serde::{Deserialize, Serialize};
use std::env;
use thiserror::Error;

/// Environment variable overriding [`RegistryConfig::default_primary_key`]
pub const ENV_DEFAULT_PRIMARY_KEY: &str = "MODEL_REGISTRY_DEFAULT_PRIMARY_KEY";
/// Environment variable overriding [`RegistryConfig::soft_delete_table_suffix`]
pub const ENV_SOFT_DELETE_SUFFIX: &str = "MODEL_REGISTRY_SOFT_DELETE_SUFFIX";
/// Environment variable overriding [`RegistryConfig::soft_delete_column_override`]
pub const ENV_SOFT_DELETE_COLUMN_OVERRIDE: &str = "MODEL_REGISTRY_SOFT_DELETE_COLUMN_OVERRIDE";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for field '{field}': '{value}'. Expected: {expected}")]
    InvalidValue {
        field: String,
        value: String,
        expected: String,
    },

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl ConfigError {
    pub fn invalid_value(
        field: impl Into<String>,
        value: impl Into<String>,
        expected: impl Into<String>,
    ) -> Self {
        Self::InvalidValue {
            field: field.into(),
            value: value.into(),
            expected: expected.into(),
        }
    }
}

/// Naming rules applied while resolving table descriptors
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Primary key column used when no field is flagged as primary key
    pub default_primary_key: String,
    /// Appended to the table name to form the logical-delete archive table
    pub soft_delete_table_suffix: String,
    /// Resolve the soft-delete column through its column override instead of
    /// the snake-cased field name
    pub soft_delete_column_override: bool,
}

impl RegistryConfig {
    /// Create the default configuration
    pub fn new() -> Self {
        Self {
            default_primary_key: "id".to_string(),
            soft_delete_table_suffix: "_delete".to_string(),
            soft_delete_column_override: false,
        }
    }

    /// Load configuration from environment variables, starting from defaults
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::new();

        if let Ok(primary_key) = env::var(ENV_DEFAULT_PRIMARY_KEY) {
            config.default_primary_key = primary_key;
        }

        if let Ok(suffix) = env::var(ENV_SOFT_DELETE_SUFFIX) {
            config.soft_delete_table_suffix = suffix;
        }

        if let Ok(flag) = env::var(ENV_SOFT_DELETE_COLUMN_OVERRIDE) {
            config.soft_delete_column_override =
                flag.parse().map_err(|_| ConfigError::InvalidValue {
                    field: "soft_delete_column_override".to_string(),
                    value: flag,
                    expected: "true or false".to_string(),
                })?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from YAML; missing keys keep their defaults
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.default_primary_key.trim().is_empty() {
            return Err(ConfigError::invalid_value(
                "default_primary_key",
                self.default_primary_key.clone(),
                "a non-empty column name",
            ));
        }

        if self.default_primary_key.contains('`') {
            return Err(ConfigError::invalid_value(
                "default_primary_key",
                self.default_primary_key.clone(),
                "a column name without backticks",
            ));
        }

        if self.soft_delete_table_suffix.is_empty() {
            return Err(ConfigError::invalid_value(
                "soft_delete_table_suffix",
                "",
                "a non-empty suffix",
            ));
        }

        if self.soft_delete_table_suffix.contains('`') {
            return Err(ConfigError::invalid_value(
                "soft_delete_table_suffix",
                self.soft_delete_table_suffix.clone(),
                "a suffix without backticks",
            ));
        }

        Ok(())
    }
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self::new()
    }
}
