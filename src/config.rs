//! Connection configuration
//!
//! A plugin connection is configured from YAML or JSON. Every field has a
//! default, so an empty document connects to the public PokéAPI.
//!
//! ```yaml
//! base_url: "https://pokeapi.co/api/v2/"
//! page_size: 50
//! max_retries: 2
//! requests_per_second: 5
//! ignore_error_messages:
//!   - "unexpected end of JSON input"
//! ```

use crate::api::DEFAULT_BASE_URL;
use crate::error::{Error, Result};
use crate::http::{HttpClientConfig, RateLimiterConfig};
use crate::types::BackoffType;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Configuration for a PokéAPI connection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PluginConfig {
    /// API root, e.g. `https://pokeapi.co/api/v2/`
    pub base_url: String,

    /// Resources requested per list page
    pub page_size: u32,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// Transport retries for 429/5xx/timeouts
    pub max_retries: u32,

    /// Backoff between retries
    pub backoff: BackoffType,

    /// Client-side rate limit; 0 disables it
    pub requests_per_second: u32,

    /// Rate limiter burst size
    pub burst_size: u32,

    /// User agent override
    pub user_agent: Option<String>,

    /// Extra error message fragments treated as "not found" by get calls
    pub ignore_error_messages: Vec<String>,
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            page_size: 20,
            timeout_secs: 30,
            max_retries: 3,
            backoff: BackoffType::Exponential,
            requests_per_second: 10,
            burst_size: 10,
            user_agent: None,
            ignore_error_messages: Vec::new(),
        }
    }
}

impl PluginConfig {
    /// Parse configuration from YAML
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        // An empty YAML document deserializes as unit, not as an empty map
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from JSON
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a `.yaml`/`.yml` or `.json` file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;

        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json_str(&content),
            Some("yaml" | "yml") | None => Self::from_yaml_str(&content),
            Some(other) => Err(Error::config(format!(
                "Unsupported config file extension '.{other}'"
            ))),
        }
    }

    /// Check values that serde cannot
    pub fn validate(&self) -> Result<()> {
        if self.base_url.trim().is_empty() {
            return Err(Error::invalid_value("base_url", "must not be empty"));
        }
        url::Url::parse(&self.base_url)
            .map_err(|e| Error::invalid_value("base_url", e.to_string()))?;
        if self.page_size == 0 {
            return Err(Error::invalid_value("page_size", "must be greater than 0"));
        }
        if self.timeout_secs == 0 {
            return Err(Error::invalid_value("timeout_secs", "must be greater than 0"));
        }
        Ok(())
    }

    /// Translate into HTTP client settings
    pub fn http_client_config(&self) -> HttpClientConfig {
        let mut builder = HttpClientConfig::builder()
            .timeout(Duration::from_secs(self.timeout_secs))
            .max_retries(self.max_retries)
            .backoff(
                self.backoff,
                Duration::from_millis(100),
                Duration::from_secs(60),
            )
            .header("Accept", "application/json");

        builder = if self.requests_per_second == 0 {
            builder.no_rate_limit()
        } else {
            builder.rate_limit(RateLimiterConfig::new(
                self.requests_per_second,
                self.burst_size.max(1),
            ))
        };

        if let Some(agent) = &self.user_agent {
            builder = builder.user_agent(agent.clone());
        }

        builder.build()
    }
}
