//! Jotter configuration management

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main Jotter configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JotterConfig {
    /// Classification oracle configuration
    #[serde(default)]
    pub oracle: OracleConfig,

    /// Document store configuration
    #[serde(default)]
    pub store: StoreConfig,

    /// Router configuration
    #[serde(default)]
    pub router: RouterConfig,
}

impl JotterConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))
    }

    /// Render the configuration as TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))
    }
}

/// Classification oracle configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OracleConfig {
    /// Chat-completions endpoint URL (OpenAI-compatible)
    pub endpoint: String,

    /// Environment variable holding the API key
    pub api_key_env: String,

    /// Model identifier
    pub model: String,

    /// Sampling temperature
    pub temperature: f32,

    /// Maximum completion tokens
    pub max_tokens: u32,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.openai.com/v1/chat/completions".to_string(),
            api_key_env: "OPENAI_API_KEY".to_string(),
            model: "gpt-4o-mini".to_string(),
            temperature: 0.0,
            max_tokens: 512,
            timeout_secs: 30,
        }
    }
}

/// Document store backend selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreBackend {
    /// In-process store, contents discarded on exit
    Memory,
    /// Remote document store service over HTTP
    Remote,
}

/// Document store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Which backend to use
    pub backend: StoreBackend,

    /// Base URL of the remote store service (remote backend only)
    pub endpoint: String,

    /// Environment variable holding the store API key, empty for none
    pub api_key_env: String,

    /// Collection name documents are written to
    pub collection: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::Memory,
            endpoint: "http://127.0.0.1:6333".to_string(),
            api_key_env: String::new(),
            collection: "jotter".to_string(),
            timeout_secs: 30,
        }
    }
}

/// Router configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouterConfig {
    /// Issue the queries of one ask action concurrently
    pub parallel_queries: bool,

    /// Per-operation timeout in seconds for store round-trips
    pub op_timeout_secs: u64,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            parallel_queries: true,
            op_timeout_secs: 30,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = JotterConfig::default();
        assert_eq!(config.store.backend, StoreBackend::Memory);
        assert!(config.router.parallel_queries);
        assert_eq!(config.oracle.api_key_env, "OPENAI_API_KEY");
    }

    #[test]
    fn test_config_roundtrip() {
        let config = JotterConfig::default();
        let toml = config.to_toml().unwrap();
        let parsed: JotterConfig = toml::from_str(&toml).unwrap();
        assert_eq!(parsed.oracle.model, config.oracle.model);
        assert_eq!(parsed.store.collection, config.store.collection);
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
[store]
backend = "remote"
endpoint = "http://store.internal:6333"
api_key_env = "STORE_KEY"
collection = "notes"
timeout_secs = 10

[router]
parallel_queries = false
op_timeout_secs = 5
"#
        )
        .unwrap();

        let config = JotterConfig::from_file(file.path()).unwrap();
        assert_eq!(config.store.backend, StoreBackend::Remote);
        assert_eq!(config.store.collection, "notes");
        assert!(!config.router.parallel_queries);
        // Oracle section omitted, falls back to defaults
        assert_eq!(config.oracle.model, "gpt-4o-mini");
    }

    #[test]
    fn test_from_file_missing() {
        let result = JotterConfig::from_file("/nonexistent/jotter.toml");
        assert!(result.is_err());
    }

    #[test]
    fn test_from_file_invalid_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not valid toml [[").unwrap();
        let result = JotterConfig::from_file(file.path());
        assert!(matches!(result, Err(Error::Config(_))));
    }
}
