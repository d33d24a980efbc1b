//! Configuration sources for hosts.
//!
//! Values come from environment variables by default and, with the `config`
//! feature, from flat JSON files. [`HostConfig`] is the typed view a
//! [`Host`](crate::Host) consumes.

use std::collections::HashMap;
use std::env;
use std::sync::RwLock;

#[cfg(feature = "config")]
use serde::{Deserialize, Serialize};

use crate::error::{DiError, DiResult};

/// Prefix of the environment variables read by the default provider.
pub const ENV_PREFIX: &str = "TINJECT";

/// A configuration value that can be various types
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(untagged))]
pub enum ConfigValue {
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
}

impl ConfigValue {
    fn kind(&self) -> &'static str {
        match self {
            ConfigValue::String(_) => "string",
            ConfigValue::Integer(_) => "integer",
            ConfigValue::Float(_) => "float",
            ConfigValue::Boolean(_) => "boolean",
        }
    }

    /// Try to convert to string
    pub fn as_string(&self) -> DiResult<&str> {
        match self {
            ConfigValue::String(s) => Ok(s),
            other => Err(DiError::TypeMismatch { expected: "string", found: other.kind() }),
        }
    }

    /// Try to convert to integer
    pub fn as_i64(&self) -> DiResult<i64> {
        match self {
            ConfigValue::Integer(i) => Ok(*i),
            other => Err(DiError::TypeMismatch { expected: "integer", found: other.kind() }),
        }
    }

    /// Try to convert to boolean
    pub fn as_bool(&self) -> DiResult<bool> {
        match self {
            ConfigValue::Boolean(b) => Ok(*b),
            other => Err(DiError::TypeMismatch { expected: "boolean", found: other.kind() }),
        }
    }

    fn parse(raw: String) -> Self {
        if let Ok(int_val) = raw.parse::<i64>() {
            ConfigValue::Integer(int_val)
        } else if let Ok(float_val) = raw.parse::<f64>() {
            ConfigValue::Float(float_val)
        } else if let Ok(bool_val) = raw.parse::<bool>() {
            ConfigValue::Boolean(bool_val)
        } else {
            ConfigValue::String(raw)
        }
    }
}

/// Trait for configuration sources
pub trait ConfigSource: Send + Sync + std::fmt::Debug {
    /// Get a configuration value by key
    fn get(&self, key: &str) -> Option<ConfigValue>;

    /// List all available keys
    fn keys(&self) -> Vec<String>;
}

/// Environment variable configuration source
///
/// Key `logging.enabled` with prefix `TINJECT` reads `TINJECT_LOGGING_ENABLED`.
#[derive(Debug, Default)]
pub struct EnvironmentConfigSource {
    /// Prefix to filter environment variables
    prefix: Option<String>,
}

impl EnvironmentConfigSource {
    pub fn new() -> Self {
        Self { prefix: None }
    }

    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self { prefix: Some(prefix.into()) }
    }

    fn env_key(&self, key: &str) -> String {
        let key = key.replace('.', "_").to_uppercase();
        match &self.prefix {
            Some(prefix) => format!("{}_{}", prefix.to_uppercase(), key),
            None => key,
        }
    }
}

impl ConfigSource for EnvironmentConfigSource {
    fn get(&self, key: &str) -> Option<ConfigValue> {
        env::var(self.env_key(key)).ok().map(ConfigValue::parse)
    }

    fn keys(&self) -> Vec<String> {
        env::vars()
            .filter_map(|(key, _)| match &self.prefix {
                Some(prefix) => {
                    let prefix_upper = format!("{}_", prefix.to_uppercase());
                    key.strip_prefix(&prefix_upper).map(|rest| rest.to_lowercase())
                }
                None => Some(key.to_lowercase()),
            })
            .collect()
    }
}

/// JSON file configuration source
///
/// The file holds one flat object, e.g. `{"logging.enabled": true}`.
#[cfg(feature = "config")]
#[derive(Debug)]
pub struct JsonConfigSource {
    /// File path to JSON configuration
    file_path: String,
    /// Cached parsed configuration
    config: RwLock<Option<HashMap<String, ConfigValue>>>,
}

#[cfg(feature = "config")]
impl JsonConfigSource {
    pub fn new(file_path: impl Into<String>) -> Self {
        Self {
            file_path: file_path.into(),
            config: RwLock::new(None),
        }
    }

    /// Reload configuration from file
    pub fn reload(&self) -> DiResult<()> {
        let content = std::fs::read_to_string(&self.file_path)
            .map_err(|e| DiError::Config(format!("cannot read {}: {}", self.file_path, e)))?;

        let parsed: HashMap<String, ConfigValue> = serde_json::from_str(&content)
            .map_err(|e| DiError::Config(format!("invalid JSON in {}: {}", self.file_path, e)))?;

        if let Ok(mut config) = self.config.write() {
            *config = Some(parsed);
        }

        Ok(())
    }
}

#[cfg(feature = "config")]
impl ConfigSource for JsonConfigSource {
    fn get(&self, key: &str) -> Option<ConfigValue> {
        // Load config if not cached
        if self.config.read().ok()?.is_none() {
            self.reload().ok()?;
        }

        self.config.read().ok()?.as_ref()?.get(key).cloned()
    }

    fn keys(&self) -> Vec<String> {
        if let Ok(config) = self.config.read() {
            if let Some(cfg) = config.as_ref() {
                return cfg.keys().cloned().collect();
            }
        }
        Vec::new()
    }
}

/// Configuration provider checking sources in priority order
#[derive(Debug)]
pub struct ConfigProvider {
    /// Configuration sources in priority order
    sources: Vec<Box<dyn ConfigSource>>,
    /// Cached configuration values
    cache: RwLock<HashMap<String, ConfigValue>>,
}

impl ConfigProvider {
    /// Create a provider without sources
    pub fn new() -> Self {
        Self {
            sources: Vec::new(),
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Add a configuration source (higher priority sources should be added first)
    pub fn add_source(&mut self, source: Box<dyn ConfigSource>) -> &mut Self {
        self.sources.push(source);
        self
    }

    /// Get a configuration value, checking sources in priority order
    pub fn get(&self, key: &str) -> Option<ConfigValue> {
        if let Ok(cache) = self.cache.read() {
            if let Some(value) = cache.get(key) {
                return Some(value.clone());
            }
        }

        let value = self.sources.iter().find_map(|source| source.get(key))?;
        if let Ok(mut cache) = self.cache.write() {
            cache.insert(key.to_string(), value.clone());
        }
        Some(value)
    }

    /// Get a string configuration value
    pub fn get_string(&self, key: &str) -> DiResult<String> {
        self.get(key)
            .ok_or_else(|| DiError::Config(format!("missing key {}", key)))?
            .as_string()
            .map(|s| s.to_string())
    }

    /// Get a string configuration value with default
    pub fn get_string_or(&self, key: &str, default: &str) -> String {
        self.get_string(key).unwrap_or_else(|_| default.to_string())
    }

    /// Get a boolean configuration value
    pub fn get_bool(&self, key: &str) -> DiResult<bool> {
        self.get(key)
            .ok_or_else(|| DiError::Config(format!("missing key {}", key)))?
            .as_bool()
    }

    /// Get a boolean configuration value with default
    pub fn get_bool_or(&self, key: &str, default: bool) -> bool {
        self.get_bool(key).unwrap_or(default)
    }

    /// Clear the configuration cache (forces reload from sources)
    pub fn invalidate_cache(&self) {
        if let Ok(mut cache) = self.cache.write() {
            cache.clear();
        }
    }

    /// Get all configuration keys from all sources
    pub fn all_keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.sources.iter().flat_map(|s| s.keys()).collect();
        keys.sort();
        keys.dedup();
        keys
    }
}

impl Default for ConfigProvider {
    fn default() -> Self {
        let mut provider = Self::new();
        provider.add_source(Box::new(EnvironmentConfigSource::with_prefix(ENV_PREFIX)));
        provider
    }
}

/// Logging settings of a host
#[derive(Debug, Clone, PartialEq)]
pub struct LoggingConfig {
    /// Attach a [`LoggingObserver`](crate::LoggingObserver) to the container
    pub enabled: bool,
    /// Prefix printed before every event
    pub prefix: String,
}

/// Host configuration
#[derive(Debug, Clone, PartialEq)]
pub struct HostConfig {
    pub logging: LoggingConfig,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            logging: LoggingConfig {
                enabled: false,
                prefix: "[tinject]".to_string(),
            },
        }
    }
}

impl HostConfig {
    /// Load configuration from a config provider
    pub fn load(config: &ConfigProvider) -> Self {
        let defaults = Self::default();
        Self {
            logging: LoggingConfig {
                enabled: config.get_bool_or("logging.enabled", defaults.logging.enabled),
                prefix: config.get_string_or("logging.prefix", &defaults.logging.prefix),
            },
        }
    }

    /// Load from `TINJECT_*` environment variables
    pub fn from_env() -> Self {
        Self::load(&ConfigProvider::default())
    }
}
