//! Process configuration
//!
//! Both API keys are optional: a missing key is a recoverable condition that
//! yields degraded responses, never a startup failure.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Environment variable holding the search API key
pub const SEARCH_API_KEY_VAR: &str = "API_KEY";
/// Environment variable holding the language-model API key
pub const LLM_API_KEY_VAR: &str = "MISTRAL_API_KEY";

const DEFAULT_SEARCH_API_BASE: &str = "https://deepsearch.jina.ai/v1";
const DEFAULT_SEARCH_MODEL: &str = "jina-deepsearch-v1";
const DEFAULT_LLM_API_BASE: &str = "https://api.mistral.ai/v1";
const DEFAULT_LLM_MODEL: &str = "mistral-large-latest";

/// Errors raised while validating configuration
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A field holds an unusable value
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Configuration for the whole service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackerConfig {
    /// Search API key (`API_KEY`)
    #[serde(skip_serializing)]
    pub search_api_key: Option<String>,

    /// Search API base URL, without the `/chat/completions` suffix
    pub search_api_base: String,

    /// Search model identifier
    pub search_model: String,

    /// Timeout for the search call
    pub search_timeout: Duration,

    /// Language-model API key (`MISTRAL_API_KEY`)
    #[serde(skip_serializing)]
    pub llm_api_key: Option<String>,

    /// Language-model API base URL
    pub llm_api_base: String,

    /// Language-model identifier
    pub llm_model: String,

    /// Timeout for each language-model call
    pub llm_timeout: Duration,

    /// Address the HTTP server binds to
    pub host: String,

    /// Port the HTTP server listens on
    pub port: u16,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            search_api_key: None,
            search_api_base: DEFAULT_SEARCH_API_BASE.to_string(),
            search_model: DEFAULT_SEARCH_MODEL.to_string(),
            search_timeout: Duration::from_secs(180),
            llm_api_key: None,
            llm_api_base: DEFAULT_LLM_API_BASE.to_string(),
            llm_model: DEFAULT_LLM_MODEL.to_string(),
            llm_timeout: Duration::from_secs(60),
            host: "127.0.0.1".to_string(),
            port: 8000,
        }
    }
}

impl TrackerConfig {
    /// Create a new configuration builder
    pub fn builder() -> TrackerConfigBuilder {
        TrackerConfigBuilder::default()
    }

    /// Read configuration from the process environment
    ///
    /// Reads `API_KEY` and `MISTRAL_API_KEY`, plus the optional overrides
    /// `JINA_API_BASE`, `MISTRAL_API_BASE` and `MISTRAL_MODEL`.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read configuration through an arbitrary variable lookup
    ///
    /// Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        Self {
            search_api_key: get(SEARCH_API_KEY_VAR),
            search_api_base: get("JINA_API_BASE").unwrap_or(defaults.search_api_base),
            llm_api_key: get(LLM_API_KEY_VAR),
            llm_api_base: get("MISTRAL_API_BASE").unwrap_or(defaults.llm_api_base),
            llm_model: get("MISTRAL_MODEL").unwrap_or(defaults.llm_model),
            ..defaults
        }
    }

    /// Whether both API keys are present
    pub fn has_credentials(&self) -> bool {
        self.search_api_key.is_some() && self.llm_api_key.is_some()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.search_timeout.is_zero() || self.llm_timeout.is_zero() {
            return Err(ConfigError::Invalid(
                "timeouts must be greater than zero".to_string(),
            ));
        }

        if self.search_api_base.is_empty() || self.llm_api_base.is_empty() {
            return Err(ConfigError::Invalid("API base URLs must not be empty".to_string()));
        }

        Ok(())
    }
}

/// Builder for TrackerConfig
#[derive(Debug, Default)]
pub struct TrackerConfigBuilder {
    base: Option<TrackerConfig>,
    search_api_key: Option<String>,
    search_api_base: Option<String>,
    search_timeout: Option<Duration>,
    llm_api_key: Option<String>,
    llm_api_base: Option<String>,
    llm_model: Option<String>,
    llm_timeout: Option<Duration>,
    host: Option<String>,
    port: Option<u16>,
}

impl TrackerConfigBuilder {
    /// Start from values read out of the environment instead of the defaults
    pub fn from_env(mut self) -> Self {
        self.base = Some(TrackerConfig::from_env());
        self
    }

    /// Set the search API key
    pub fn search_api_key(mut self, key: impl Into<String>) -> Self {
        self.search_api_key = Some(key.into());
        self
    }

    /// Set the search API base URL
    pub fn search_api_base(mut self, base: impl Into<String>) -> Self {
        self.search_api_base = Some(base.into());
        self
    }

    /// Set the search timeout
    pub fn search_timeout(mut self, timeout: Duration) -> Self {
        self.search_timeout = Some(timeout);
        self
    }

    /// Set the language-model API key
    pub fn llm_api_key(mut self, key: impl Into<String>) -> Self {
        self.llm_api_key = Some(key.into());
        self
    }

    /// Set the language-model API base URL
    pub fn llm_api_base(mut self, base: impl Into<String>) -> Self {
        self.llm_api_base = Some(base.into());
        self
    }

    /// Set the language-model identifier
    pub fn llm_model(mut self, model: impl Into<String>) -> Self {
        self.llm_model = Some(model.into());
        self
    }

    /// Set the language-model timeout
    pub fn llm_timeout(mut self, timeout: Duration) -> Self {
        self.llm_timeout = Some(timeout);
        self
    }

    /// Set the bind host
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    /// Set the listen port
    pub fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<TrackerConfig, ConfigError> {
        let base = self.base.unwrap_or_default();

        let config = TrackerConfig {
            search_api_key: self.search_api_key.or(base.search_api_key),
            search_api_base: self.search_api_base.unwrap_or(base.search_api_base),
            search_model: base.search_model,
            search_timeout: self.search_timeout.unwrap_or(base.search_timeout),
            llm_api_key: self.llm_api_key.or(base.llm_api_key),
            llm_api_base: self.llm_api_base.unwrap_or(base.llm_api_base),
            llm_model: self.llm_model.unwrap_or(base.llm_model),
            llm_timeout: self.llm_timeout.unwrap_or(base.llm_timeout),
            host: self.host.unwrap_or(base.host),
            port: self.port.unwrap_or(base.port),
        };

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = TrackerConfig::default();
        assert_eq!(config.search_timeout, Duration::from_secs(180));
        assert_eq!(config.llm_model, "mistral-large-latest");
        assert!(!config.has_credentials());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_lookup_reads_keys() {
        let config = TrackerConfig::from_lookup(lookup(&[
            ("API_KEY", "jina-key"),
            ("MISTRAL_API_KEY", "mistral-key"),
            ("MISTRAL_MODEL", "mistral-small-latest"),
        ]));

        assert_eq!(config.search_api_key.as_deref(), Some("jina-key"));
        assert_eq!(config.llm_api_key.as_deref(), Some("mistral-key"));
        assert_eq!(config.llm_model, "mistral-small-latest");
        assert_eq!(config.search_api_base, "https://deepsearch.jina.ai/v1");
        assert!(config.has_credentials());
    }

    #[test]
    fn test_empty_key_counts_as_missing() {
        let config = TrackerConfig::from_lookup(lookup(&[
            ("API_KEY", "  "),
            ("MISTRAL_API_KEY", "mistral-key"),
        ]));

        assert!(config.search_api_key.is_none());
        assert!(!config.has_credentials());
    }

    #[test]
    fn test_config_builder() {
        let config = TrackerConfig::builder()
            .search_api_key("a")
            .llm_api_key("b")
            .port(9000)
            .llm_timeout(Duration::from_secs(5))
            .build()
            .unwrap();

        assert_eq!(config.port, 9000);
        assert_eq!(config.llm_timeout, Duration::from_secs(5));
        assert!(config.has_credentials());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let result = TrackerConfig::builder()
            .search_timeout(Duration::ZERO)
            .build();

        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_keys_not_serialized() {
        let config = TrackerConfig::builder()
            .search_api_key("secret-one")
            .llm_api_key("secret-two")
            .build()
            .unwrap();

        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("secret-one"));
        assert!(!json.contains("secret-two"));
        assert!(json.contains("mistral-large-latest"));
    }
}
