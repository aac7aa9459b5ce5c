//! Alias management
//!
//! Aliases are named references to S3-compatible storage endpoints,
//! including connection details, credentials and transport tuning.

use serde::{Deserialize, Serialize};

use crate::config::ConfigManager;
use crate::error::{Error, Result};

/// Retry configuration handed to the SDK client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Maximum number of attempts, including the first one
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Initial backoff duration in milliseconds
    #[serde(default = "default_initial_backoff")]
    pub initial_backoff_ms: u64,

    /// Maximum backoff duration in milliseconds
    #[serde(default = "default_max_backoff")]
    pub max_backoff_ms: u64,
}

fn default_max_attempts() -> u32 {
    3
}

fn default_initial_backoff() -> u64 {
    100
}

fn default_max_backoff() -> u64 {
    10000
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            initial_backoff_ms: default_initial_backoff(),
            max_backoff_ms: default_max_backoff(),
        }
    }
}

/// Timeout configuration handed to the SDK client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeoutConfig {
    /// Connection timeout in milliseconds
    #[serde(default = "default_connect_timeout")]
    pub connect_ms: u64,

    /// Read timeout in milliseconds
    #[serde(default = "default_read_timeout")]
    pub read_ms: u64,

    /// Whole-operation timeout in milliseconds, retries included
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operation_ms: Option<u64>,
}

fn default_connect_timeout() -> u64 {
    5000
}

fn default_read_timeout() -> u64 {
    30000
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            connect_ms: default_connect_timeout(),
            read_ms: default_read_timeout(),
            operation_ms: None,
        }
    }
}

/// Bucket addressing style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BucketLookup {
    /// Path style for custom endpoints, virtual hosts for AWS
    #[default]
    Auto,
    /// `endpoint/bucket/key`
    Path,
    /// `bucket.endpoint/key`
    Dns,
}

impl BucketLookup {
    /// Whether requests should use path-style addressing
    pub fn force_path_style(self, has_custom_endpoint: bool) -> bool {
        match self {
            BucketLookup::Path => true,
            BucketLookup::Dns => false,
            BucketLookup::Auto => has_custom_endpoint,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            BucketLookup::Auto => "auto",
            BucketLookup::Path => "path",
            BucketLookup::Dns => "dns",
        }
    }
}

impl std::fmt::Display for BucketLookup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for BucketLookup {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "auto" => Ok(BucketLookup::Auto),
            "path" => Ok(BucketLookup::Path),
            "dns" => Ok(BucketLookup::Dns),
            other => Err(Error::Config(format!(
                "Unknown bucket lookup '{other}'. Expected auto, path or dns"
            ))),
        }
    }
}

/// An alias represents a named S3-compatible storage endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alias {
    /// Unique name for this alias
    pub name: String,

    /// Endpoint URL; `None` uses the provider's regional endpoint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,

    /// Access key ID
    pub access_key: String,

    /// Secret access key
    pub secret_key: String,

    /// Region used for signing
    #[serde(default = "default_region")]
    pub region: String,

    #[serde(default)]
    pub bucket_lookup: BucketLookup,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retry: Option<RetryConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<TimeoutConfig>,
}

fn default_region() -> String {
    "us-east-1".to_string()
}

impl Alias {
    /// Create a new alias with required fields
    pub fn new(
        name: impl Into<String>,
        endpoint: Option<String>,
        access_key: impl Into<String>,
        secret_key: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            endpoint,
            access_key: access_key.into(),
            secret_key: secret_key.into(),
            region: default_region(),
            bucket_lookup: BucketLookup::default(),
            retry: None,
            timeout: None,
        }
    }

    /// Check the name and endpoint before the alias is saved
    pub fn validate(&self) -> Result<()> {
        if !is_valid_alias_name(&self.name) {
            return Err(Error::Config(format!(
                "Invalid alias name '{}'. Use letters, digits, '-' or '_'",
                self.name
            )));
        }
        if let Some(endpoint) = &self.endpoint {
            let url = url::Url::parse(endpoint)?;
            if url.scheme() != "http" && url.scheme() != "https" {
                return Err(Error::Config(format!(
                    "Endpoint must use http or https: {endpoint}"
                )));
            }
        }
        Ok(())
    }

    /// Get the effective retry configuration
    pub fn retry_config(&self) -> RetryConfig {
        self.retry.clone().unwrap_or_default()
    }

    /// Get the effective timeout configuration
    pub fn timeout_config(&self) -> TimeoutConfig {
        self.timeout.clone().unwrap_or_default()
    }
}

/// Check if a string is a valid alias name
pub(crate) fn is_valid_alias_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

/// Manager for alias operations
pub struct AliasManager {
    config_manager: ConfigManager,
}

impl AliasManager {
    /// Create a new AliasManager with a specific ConfigManager
    pub fn with_config_manager(config_manager: ConfigManager) -> Self {
        Self { config_manager }
    }

    /// Create a new AliasManager using the default config location
    pub fn new() -> Result<Self> {
        let config_manager = ConfigManager::new()?;
        Ok(Self { config_manager })
    }

    /// List all configured aliases
    pub fn list(&self) -> Result<Vec<Alias>> {
        let config = self.config_manager.load()?;
        Ok(config.aliases)
    }

    /// Get an alias by name
    pub fn get(&self, name: &str) -> Result<Alias> {
        let config = self.config_manager.load()?;
        config
            .aliases
            .into_iter()
            .find(|a| a.name == name)
            .ok_or_else(|| Error::AliasNotFound(name.to_string()))
    }

    /// Add or replace an alias
    pub fn set(&self, alias: Alias) -> Result<()> {
        alias.validate()?;
        let mut config = self.config_manager.load()?;

        config.aliases.retain(|a| a.name != alias.name);
        config.aliases.push(alias);

        self.config_manager.save(&config)
    }

    /// Remove an alias
    pub fn remove(&self, name: &str) -> Result<()> {
        let mut config = self.config_manager.load()?;
        let original_len = config.aliases.len();

        config.aliases.retain(|a| a.name != name);

        if config.aliases.len() == original_len {
            return Err(Error::AliasNotFound(name.to_string()));
        }

        self.config_manager.save(&config)
    }
}
