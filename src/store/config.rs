//! Store client configuration.
//!
//! Settings come from environment variables with sane defaults, or from a
//! TOML file when one is provided. Only the HTTP client reads these; the
//! in-memory store needs no configuration.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use super::error::{StoreError, StoreResult};

fn default_base_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_request_timeout_secs() -> u64 {
    10
}

fn default_fetch_retries() -> u32 {
    3
}

fn default_retry_delay_ms() -> u64 {
    250
}

/// Connection settings for the remote flight record store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Base URL of the store, without a trailing slash.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Bound on any single request, in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Extra attempts for the collection fetch (the toggle PATCH is never
    /// retried automatically; the operator retries it).
    #[serde(default = "default_fetch_retries")]
    pub fetch_retries: u32,
    /// Initial backoff delay between fetch attempts; doubles per attempt.
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            base_url: default_base_url(),
            request_timeout_secs: default_request_timeout_secs(),
            fetch_retries: default_fetch_retries(),
            retry_delay_ms: default_retry_delay_ms(),
        }
    }
}

impl StoreConfig {
    /// Build from environment variables, falling back to defaults.
    ///
    /// - `CHECKLIST_STORE_URL`
    /// - `CHECKLIST_REQUEST_TIMEOUT_SECS`
    /// - `CHECKLIST_FETCH_RETRIES`
    /// - `CHECKLIST_RETRY_DELAY_MS`
    pub fn from_env() -> Self {
        let defaults = StoreConfig::default();
        StoreConfig {
            base_url: std::env::var("CHECKLIST_STORE_URL")
                .map(|s| s.trim_end_matches('/').to_string())
                .unwrap_or(defaults.base_url),
            request_timeout_secs: env_parse(
                "CHECKLIST_REQUEST_TIMEOUT_SECS",
                defaults.request_timeout_secs,
            ),
            fetch_retries: env_parse("CHECKLIST_FETCH_RETRIES", defaults.fetch_retries),
            retry_delay_ms: env_parse("CHECKLIST_RETRY_DELAY_MS", defaults.retry_delay_ms),
        }
    }

    /// Load from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> StoreResult<Self> {
        let text = std::fs::read_to_string(path.as_ref())
            .map_err(|e| StoreError::Transport(format!("read config file: {e}")))?;
        toml::from_str(&text).map_err(|e| StoreError::Decode(format!("parse config file: {e}")))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_are_sensible() {
        let config = StoreConfig::default();
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.request_timeout(), Duration::from_secs(10));
        assert_eq!(config.fetch_retries, 3);
    }

    #[test]
    fn loads_partial_toml_with_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "base_url = \"http://store.example:9090\"").unwrap();
        writeln!(file, "fetch_retries = 5").unwrap();

        let config = StoreConfig::from_file(file.path()).unwrap();
        assert_eq!(config.base_url, "http://store.example:9090");
        assert_eq!(config.fetch_retries, 5);
        assert_eq!(config.request_timeout_secs, 10);
    }

    #[test]
    fn missing_config_file_is_an_error() {
        assert!(StoreConfig::from_file("/nonexistent/checklist.toml").is_err());
    }
}
